//! Search engine: configuration, builder and orchestration.

use super::parallel::scan_parallel;
use super::probe::{Probe, Tally, Verdict};
use super::{SearchOutcome, SearchState};
use crate::core::comparator::{Offer, Tolerance, TopKSelector, DEFAULT_TOP_K};
use crate::core::hasher::{
    BitSignature, FrequencyThreshold, GridDecoder, HashAlgorithm, HashVariant, HasherConfig,
    ImageGridDecoder,
};
use crate::core::scanner::{CandidateSource, Candidates, ScanConfig, WalkDirScanner};
use crate::error::{Result, SearchError};
use crate::events::{null_sender, Event, EventSender, SearchEvent, SearchSummary};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Worker count used when the platform cannot report its parallelism
pub const FALLBACK_WORKERS: usize = 4;

/// How candidates are processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One candidate at a time on the calling thread
    Sequential,
    /// A pool of worker threads; `None` sizes it from the machine
    Parallel { workers: Option<usize> },
}

impl ExecutionMode {
    /// Number of threads doing hashing work
    pub fn worker_count(&self) -> usize {
        match self {
            ExecutionMode::Sequential => 1,
            ExecutionMode::Parallel { workers: Some(n) } => *n,
            ExecutionMode::Parallel { workers: None } => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(FALLBACK_WORKERS),
        }
    }
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Parallel { workers: None }
    }
}

/// Configuration for a search
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Hash variant used for the reference and every candidate
    pub variant: HashVariant,
    /// Largest distance a candidate may have and still be ranked
    pub tolerance: Tolerance,
    /// Number of results to keep
    pub top: usize,
    /// Sequential or parallel execution
    pub mode: ExecutionMode,
    /// Threshold rule for the frequency variant
    pub frequency_threshold: FrequencyThreshold,
    /// Gallery traversal settings
    pub scan_config: ScanConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            variant: HashVariant::Frequency,
            tolerance: Tolerance::default(),
            top: DEFAULT_TOP_K,
            mode: ExecutionMode::default(),
            frequency_threshold: FrequencyThreshold::Mean,
            scan_config: ScanConfig::default(),
        }
    }
}

/// Builder for [`SearchEngine`]
pub struct SearchEngineBuilder {
    config: SearchConfig,
    decoder: Option<Box<dyn GridDecoder>>,
}

impl SearchEngineBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
            decoder: None,
        }
    }

    /// Set the hash variant
    pub fn variant(mut self, variant: HashVariant) -> Self {
        self.config.variant = variant;
        self
    }

    /// Set the similarity tolerance
    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set how many results to keep
    pub fn top(mut self, top: usize) -> Self {
        self.config.top = top;
        self
    }

    /// Set the execution mode
    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the threshold rule for the frequency variant
    pub fn frequency_threshold(mut self, threshold: FrequencyThreshold) -> Self {
        self.config.frequency_threshold = threshold;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Include hidden files and directories
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan_config.include_hidden = include;
        self
    }

    /// Replace the image decoder
    pub fn decoder(mut self, decoder: Box<dyn GridDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Validate the configuration and build the engine
    pub fn build(self) -> Result<SearchEngine> {
        if self.config.top == 0 {
            return Err(SearchError::Config(
                "number of results must be at least 1".to_string(),
            ));
        }
        if let ExecutionMode::Parallel { workers: Some(0) } = self.config.mode {
            return Err(SearchError::Config(
                "worker count must be at least 1".to_string(),
            ));
        }

        let hasher = HasherConfig::new()
            .variant(self.config.variant)
            .frequency_threshold(self.config.frequency_threshold)
            .build();

        Ok(SearchEngine {
            config: self.config,
            hasher,
            decoder: self
                .decoder
                .unwrap_or_else(|| Box::new(ImageGridDecoder::new())),
        })
    }
}

impl Default for SearchEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the images in a gallery closest to a reference image.
///
/// An engine holds no per-search state: every call to a `search*` method
/// owns its selector and, in parallel mode, its worker threads, all of
/// which are gone when the call returns.
pub struct SearchEngine {
    config: SearchConfig,
    hasher: Box<dyn HashAlgorithm>,
    decoder: Box<dyn GridDecoder>,
}

impl SearchEngine {
    /// Create a new engine builder
    pub fn builder() -> SearchEngineBuilder {
        SearchEngineBuilder::new()
    }

    /// Hash the reference image.
    ///
    /// Any failure here is fatal and reported as
    /// [`SearchError::InvalidReference`].
    pub fn hash_reference(&self, reference: &Path) -> Result<BitSignature> {
        if !self.decoder.accepts(reference) {
            let reason = if reference.exists() {
                "not a recognised image file"
            } else {
                "no such file"
            };
            return Err(SearchError::InvalidReference {
                path: reference.to_path_buf(),
                reason: reason.to_string(),
            });
        }

        self.hasher
            .hash_file(reference, self.decoder.as_ref())
            .map_err(|e| SearchError::InvalidReference {
                path: reference.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Search the gallery paths (files or directories) without events
    pub fn search(&self, reference: &Path, gallery: &[PathBuf]) -> Result<SearchOutcome> {
        self.search_with_events(reference, gallery, &null_sender())
    }

    /// Search the gallery paths (files or directories) with event reporting
    pub fn search_with_events(
        &self,
        reference: &Path,
        gallery: &[PathBuf],
        events: &EventSender,
    ) -> Result<SearchOutcome> {
        let scanner = WalkDirScanner::new(gallery.to_vec(), self.config.scan_config.clone());
        self.search_source(reference, &scanner, events)
    }

    /// Search any candidate source.
    ///
    /// The reference is hashed and the source opened before any candidate
    /// is touched; failures there abort the search. Failures on individual
    /// candidates are reported through `events` and skipped.
    pub fn search_source(
        &self,
        reference: &Path,
        source: &dyn CandidateSource,
        events: &EventSender,
    ) -> Result<SearchOutcome> {
        let start_time = Instant::now();
        let mut state = SearchState::Idle;

        let signature = self.hash_reference(reference)?;
        let candidates = source.candidates()?;

        let workers = self.config.mode.worker_count();
        info!(
            "Searching for images similar to {} ({}, {}, {} worker(s))",
            reference.display(),
            self.config.variant,
            self.config.tolerance,
            workers
        );
        events.send(Event::Search(SearchEvent::Started {
            reference: reference.to_path_buf(),
            variant: self.config.variant,
            max_distance: self.config.tolerance.max_distance(),
            workers,
        }));
        advance(&mut state, SearchState::Scanning, events);

        let probe = Probe {
            hasher: self.hasher.as_ref(),
            decoder: self.decoder.as_ref(),
            reference: signature,
            tolerance: self.config.tolerance,
            events,
        };
        let mut selector = TopKSelector::new(self.config.top);

        let (scan_end, tally) = match self.config.mode {
            ExecutionMode::Sequential => scan_sequential(&probe, candidates, &mut selector),
            ExecutionMode::Parallel { .. } => {
                scan_parallel(&probe, candidates, workers, &mut selector)
            }
        };
        advance(&mut state, scan_end, events);

        let result = selector.drain();
        if scan_end == SearchState::ExactMatch {
            if let Some(best) = result.best() {
                info!("Exact match: {}", best.path.display());
                events.send(Event::Search(SearchEvent::ExactMatch {
                    path: best.path.clone(),
                }));
            }
        }
        advance(&mut state, SearchState::Done, events);

        let summary = SearchSummary {
            candidates_discovered: tally.discovered,
            candidates_checked: tally.checked,
            candidates_skipped: tally.skipped,
            within_tolerance: tally.within_tolerance,
            workers,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };
        info!(
            "Search finished: {} checked, {} skipped, {} ranked in {}ms",
            summary.candidates_checked,
            summary.candidates_skipped,
            result.len(),
            summary.duration_ms
        );
        events.send(Event::Search(SearchEvent::Completed {
            summary: summary.clone(),
        }));

        Ok(SearchOutcome {
            result,
            ended_with: scan_end,
            summary,
        })
    }
}

fn advance(state: &mut SearchState, next: SearchState, events: &EventSender) {
    debug_assert!(
        state.can_advance_to(next),
        "illegal search transition {state} -> {next}"
    );
    info!("Search state: {} -> {}", state, next);
    *state = next;
    events.send(Event::Search(SearchEvent::StateChanged { state: next }));
}

/// Process candidates one at a time, stopping at the first exact match
fn scan_sequential(
    probe: &Probe<'_>,
    candidates: Candidates<'_>,
    selector: &mut TopKSelector,
) -> (SearchState, Tally) {
    let mut tally = Tally::default();

    for (offset, path) in candidates.enumerate() {
        tally.discovered += 1;
        let verdict = probe.check(offset + 1, &path);
        tally.record(verdict);

        if let Verdict::Within(distance) = verdict {
            if selector.offer(path, distance) == Offer::ExactMatch {
                return (SearchState::ExactMatch, tally);
            }
        }
    }

    (SearchState::Exhausted, tally)
}
