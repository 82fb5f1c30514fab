//! Per-candidate work: decode, hash, measure, report.
//!
//! This is the only piece both execution modes share, so sequential and
//! parallel searches compare candidates identically.

use crate::core::comparator::Tolerance;
use crate::core::hasher::{BitSignature, GridDecoder, HashAlgorithm};
use crate::events::{CandidateEvent, CandidateProgress, Event, EventSender};
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of probing one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// Close enough to be offered to the selector
    Within(u32),
    /// Hashed, but farther than the tolerance allows
    Outside(u32),
    /// Could not be decoded or hashed
    Skipped,
}

/// Read-only context every probe needs
pub(crate) struct Probe<'a> {
    pub hasher: &'a dyn HashAlgorithm,
    pub decoder: &'a dyn GridDecoder,
    pub reference: BitSignature,
    pub tolerance: Tolerance,
    pub events: &'a EventSender,
}

impl Probe<'_> {
    /// Compare the candidate at `path` (discovered `index`-th, 1-based)
    /// against the reference. Failures are logged and reported, never
    /// returned.
    pub fn check(&self, index: usize, path: &Path) -> Verdict {
        let signature = match self.hasher.hash_file(path, self.decoder) {
            Ok(signature) => signature,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                self.events
                    .send(Event::Candidate(CandidateEvent::Skipped {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    }));
                return Verdict::Skipped;
            }
        };

        let distance = self.reference.distance(signature);
        debug!("checking {}: {} ({})", index, path.display(), distance);
        self.events
            .send(Event::Candidate(CandidateEvent::Checked(CandidateProgress {
                index,
                path: path.to_path_buf(),
                distance,
            })));

        if self.tolerance.admits(distance) {
            Verdict::Within(distance)
        } else {
            Verdict::Outside(distance)
        }
    }
}

/// Counters kept by whoever runs probes; merged after the scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub discovered: usize,
    pub checked: usize,
    pub skipped: usize,
    pub within_tolerance: usize,
}

impl Tally {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Within(_) => {
                self.checked += 1;
                self.within_tolerance += 1;
            }
            Verdict::Outside(_) => self.checked += 1,
            Verdict::Skipped => self.skipped += 1,
        }
    }

    pub fn merge(&mut self, other: Tally) {
        self.discovered += other.discovered;
        self.checked += other.checked;
        self.skipped += other.skipped;
        self.within_tolerance += other.within_tolerance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher::AverageHasher;
    use crate::core::search::test_support::StubDecoder;
    use crate::events::EventChannel;
    use std::path::PathBuf;

    const REFERENCE: u64 = 0xFFFF_FFFF_0000_0000;

    #[test]
    fn classifies_by_tolerance() {
        let decoder = StubDecoder::new()
            .with("near.png", REFERENCE ^ 0b111)
            .with("far.png", REFERENCE ^ 0xFFFF);
        let (events, _rx) = EventChannel::new();
        let probe = Probe {
            hasher: &AverageHasher::new(),
            decoder: &decoder,
            reference: BitSignature::from_bits(REFERENCE),
            tolerance: Tolerance::new(5).unwrap(),
            events: &events,
        };

        assert_eq!(probe.check(1, Path::new("near.png")), Verdict::Within(3));
        assert_eq!(probe.check(2, Path::new("far.png")), Verdict::Outside(16));
    }

    #[test]
    fn failed_decode_is_skipped_and_reported() {
        let decoder = StubDecoder::new();
        let (events, receiver) = EventChannel::new();
        let probe = Probe {
            hasher: &AverageHasher::new(),
            decoder: &decoder,
            reference: BitSignature::from_bits(REFERENCE),
            tolerance: Tolerance::default(),
            events: &events,
        };

        assert_eq!(probe.check(1, Path::new("broken.jpg")), Verdict::Skipped);
        match receiver.try_recv() {
            Some(Event::Candidate(CandidateEvent::Skipped { path, .. })) => {
                assert_eq!(path, PathBuf::from("broken.jpg"))
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn tally_counts_each_verdict() {
        let mut tally = Tally::default();
        tally.record(Verdict::Within(2));
        tally.record(Verdict::Outside(30));
        tally.record(Verdict::Skipped);

        let mut total = Tally {
            discovered: 3,
            ..Tally::default()
        };
        total.merge(tally);

        assert_eq!(total.discovered, 3);
        assert_eq!(total.checked, 2);
        assert_eq!(total.skipped, 1);
        assert_eq!(total.within_tolerance, 1);
    }
}
