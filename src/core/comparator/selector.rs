//! Bounded top-K selection over a stream of scored candidates.

use super::MatchType;
use crate::core::hasher::similarity_percent;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::path::PathBuf;

/// Number of results kept when nothing else is configured
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, PartialEq, Eq)]
struct HeldEntry {
    distance: u32,
    /// Arrival order; breaks distance ties in favour of earlier arrivals
    order: u64,
    path: PathBuf,
}

impl Ord for HeldEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap top = largest distance, latest arrival among equals
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.order.cmp(&other.order))
    }
}

impl PartialOrd for HeldEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What happened to an offered candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// Now held among the best K
    Admitted,
    /// Not better than anything held
    Rejected,
    /// Distance 0: every other entry was discarded and the caller should
    /// stop producing candidates
    ExactMatch,
}

/// Keeps the K lowest-distance candidates seen so far.
///
/// Internally a max-heap of at most K entries, so the current worst is
/// always at the top and can be replaced in `O(log K)`.
#[derive(Debug)]
pub struct TopKSelector {
    capacity: usize,
    heap: BinaryHeap<HeldEntry>,
    exact: Option<HeldEntry>,
    arrivals: u64,
}

impl TopKSelector {
    /// Create a selector holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
            exact: None,
            arrivals: 0,
        }
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        if self.exact.is_some() {
            1
        } else {
            self.heap.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a distance-0 candidate has been offered
    pub fn has_exact_match(&self) -> bool {
        self.exact.is_some()
    }

    /// Offer a candidate.
    ///
    /// With room left it is admitted unconditionally. Once full, it
    /// replaces the current worst only if strictly closer, so an equal
    /// distance never evicts an earlier arrival. A distance of 0 wins
    /// outright; after that every further offer is rejected.
    pub fn offer(&mut self, path: PathBuf, distance: u32) -> Offer {
        if self.exact.is_some() || self.capacity == 0 {
            return Offer::Rejected;
        }

        let entry = HeldEntry {
            distance,
            order: self.arrivals,
            path,
        };
        self.arrivals += 1;

        if distance == 0 {
            self.heap.clear();
            self.exact = Some(entry);
            return Offer::ExactMatch;
        }

        if self.heap.len() < self.capacity {
            self.heap.push(entry);
            return Offer::Admitted;
        }

        match self.heap.peek_mut() {
            Some(mut worst) if distance < worst.distance => {
                *worst = entry;
                Offer::Admitted
            }
            _ => Offer::Rejected,
        }
    }

    /// Finish the search: entries sorted by ascending distance, ties in
    /// arrival order.
    pub fn drain(self) -> RankedResult {
        let entries = match self.exact {
            Some(exact) => vec![exact],
            None => self.heap.into_sorted_vec(),
        };

        RankedResult(
            entries
                .into_iter()
                .map(|entry| RankedMatch {
                    path: entry.path,
                    distance: entry.distance,
                })
                .collect(),
        )
    }
}

impl Default for TopKSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

/// One ranked candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub path: PathBuf,
    pub distance: u32,
}

impl RankedMatch {
    /// `(64 - distance) / 64 * 100`
    pub fn similarity_percent(&self) -> f64 {
        similarity_percent(self.distance)
    }

    pub fn match_type(&self) -> MatchType {
        MatchType::from_distance(self.distance)
    }
}

/// The final ranking, most similar first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedResult(Vec<RankedMatch>);

impl RankedResult {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedMatch> {
        self.0.iter()
    }

    /// The closest match, if any
    pub fn best(&self) -> Option<&RankedMatch> {
        self.0.first()
    }

    pub fn into_vec(self) -> Vec<RankedMatch> {
        self.0
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a RankedMatch;
    type IntoIter = std::slice::Iter<'a, RankedMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
