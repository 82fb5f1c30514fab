//! # CLI Module
//!
//! Command-line interface for the similar image search.
//!
//! ## Usage
//! ```bash
//! # Find the three images closest to cat.jpg
//! isearch cat.jpg ~/Pictures
//!
//! # Difference hash, strict tolerance, five results
//! isearch cat.jpg ~/Pictures ~/Downloads -a dhash -l 3 -n 5
//!
//! # JSON output for scripting
//! isearch cat.jpg ~/Pictures --output json
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use similar_search::core::comparator::{RankedResult, Tolerance};
use similar_search::core::hasher::{FrequencyThreshold, HashVariant};
use similar_search::core::reporter::{export_json, format_report, ReportView};
use similar_search::core::search::{ExecutionMode, SearchEngine, SearchOutcome};
use similar_search::error::Result;
use similar_search::events::{CandidateEvent, Event, EventChannel, SearchEvent};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Find the images in a gallery that look most like a reference image
#[derive(Parser, Debug)]
#[command(name = "isearch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Reference image
    reference: PathBuf,

    /// Images or directories to search
    #[arg(required = true)]
    gallery: Vec<PathBuf>,

    /// Hash algorithm to use
    #[arg(short, long, default_value = "frequency")]
    algorithm: Algorithm,

    /// Similarity tolerance (1 = near-identical only, 10 = loosest)
    #[arg(
        short,
        long,
        default_value_t = Tolerance::DEFAULT_LEVEL,
        value_parser = clap::value_parser!(u8).range(1..=10)
    )]
    level: u8,

    /// Number of results to show
    #[arg(short = 'n', long, default_value_t = 3)]
    top: usize,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Hash one image at a time on a single thread
    #[arg(long, conflicts_with = "jobs")]
    sequential: bool,

    /// Threshold rule for the frequency hash
    #[arg(long, default_value = "mean")]
    frequency_threshold: Threshold,

    /// Include hidden files and directories
    #[arg(long)]
    include_hidden: bool,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Average Hash - fastest, sensitive to tone changes
    #[value(alias = "ahash")]
    Average,
    /// Difference Hash - compares neighbouring pixels
    #[value(alias = "dhash")]
    Difference,
    /// Perceptual Hash - DCT based, most robust (default)
    #[value(alias = "phash")]
    Frequency,
}

impl From<Algorithm> for HashVariant {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Average => HashVariant::Average,
            Algorithm::Difference => HashVariant::Difference,
            Algorithm::Frequency => HashVariant::Frequency,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Threshold {
    /// Mean of the low-frequency coefficients
    Mean,
    /// Median of the low-frequency coefficients
    Median,
}

impl From<Threshold> for FrequencyThreshold {
    fn from(threshold: Threshold) -> Self {
        match threshold {
            Threshold::Mean => FrequencyThreshold::Mean,
            Threshold::Median => FrequencyThreshold::Median,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    similar_search::init_tracing(cli.verbose);

    let mode = if cli.sequential {
        ExecutionMode::Sequential
    } else {
        ExecutionMode::Parallel { workers: cli.jobs }
    };
    let variant = HashVariant::from(cli.algorithm);

    let engine = SearchEngine::builder()
        .variant(variant)
        .tolerance(Tolerance::new(cli.level)?)
        .top(cli.top)
        .mode(mode)
        .frequency_threshold(cli.frequency_threshold.into())
        .include_hidden(cli.include_hidden)
        .build()?;

    let (sender, receiver) = EventChannel::new();

    // Spinner for pretty output
    let progress = if matches!(cli.output, OutputFormat::Pretty) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose = cli.verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(pb) = progress_clone.as_ref() else {
                continue;
            };
            match event {
                Event::Search(SearchEvent::Started { workers, .. }) => {
                    pb.set_message(format!("Searching with {} worker(s)", workers));
                }
                Event::Candidate(CandidateEvent::Checked(p)) => {
                    pb.set_message(format!(
                        "checking {}: {} ({})",
                        p.index,
                        p.path.display(),
                        p.distance
                    ));
                }
                Event::Candidate(CandidateEvent::Skipped { path, message }) if verbose => {
                    pb.println(format!(
                        "{} {}: {}",
                        style("skipped").yellow(),
                        path.display(),
                        message
                    ));
                }
                Event::Search(SearchEvent::Completed { .. }) => pb.finish_and_clear(),
                _ => {}
            }
        }
    });

    let outcome = engine.search_with_events(&cli.reference, &cli.gallery, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let outcome = outcome?;
    match cli.output {
        OutputFormat::Pretty => print_pretty_results(&cli.reference, &outcome),
        OutputFormat::Json => {
            let view = ReportView::new(cli.reference.clone(), variant, &outcome);
            export_json(&view, io::stdout().lock())?;
        }
        OutputFormat::Minimal => print_minimal_results(&outcome.result),
    }

    Ok(())
}

fn print_pretty_results(reference: &Path, outcome: &SearchOutcome) {
    let term = Term::stdout();
    let report = format_report(&reference.display().to_string(), &outcome.result);

    for (i, line) in report.lines().enumerate() {
        if i == 0 && !outcome.result.is_empty() {
            term.write_line(&style(line).bold().to_string()).ok();
        } else {
            term.write_line(line).ok();
        }
    }

    let summary = &outcome.summary;
    Term::stderr()
        .write_line(&format!(
            "{}",
            style(format!(
                "{} checked, {} skipped in {:.1}s",
                summary.candidates_checked,
                summary.candidates_skipped,
                summary.duration_ms as f64 / 1000.0
            ))
            .dim()
        ))
        .ok();
}

fn print_minimal_results(result: &RankedResult) {
    for m in result {
        println!("{}", m.path.display());
    }
}
