//! # Reporter Module
//!
//! Turns a ranked result into something a person (or a script) can read.
//!
//! ## Formats
//! - **Plain text** via [`format_report`]: a 1-based ranked list with the
//!   similarity of each match, or a single "not found" line
//! - **JSON** via [`export_json`]: the same ranking plus distances, match
//!   classes and the search summary

mod export;

pub use export::{export_json, MatchView, ReportView};

use crate::core::comparator::{RankedMatch, RankedResult};
use std::fmt::Write as _;

/// Similarity with one decimal, exactly as printed in the text report
pub(crate) fn similarity_label(m: &RankedMatch) -> String {
    format!("{:.1}", m.similarity_percent())
}

/// Message printed when nothing was within tolerance
pub fn not_found_message(reference: &str) -> String {
    format!("No similar image found for \"{reference}\".")
}

/// Render the ranking as plain text.
///
/// ```text
/// Images similar to cat.jpg:
/// 1. gallery/cat-copy.jpg (96.9%)
/// 2. gallery/cat-small.jpg (92.2%)
/// ```
pub fn format_report(reference: &str, result: &RankedResult) -> String {
    if result.is_empty() {
        return not_found_message(reference);
    }

    let mut report = format!("Images similar to {reference}:");
    for (rank, m) in result.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = write!(
            report,
            "\n{}. {} ({}%)",
            rank + 1,
            m.path.display(),
            similarity_label(m)
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comparator::TopKSelector;
    use std::path::PathBuf;

    fn result_of(entries: &[(&str, u32)]) -> RankedResult {
        let mut selector = TopKSelector::new(entries.len().max(1));
        for (path, distance) in entries {
            selector.offer(PathBuf::from(path), *distance);
        }
        selector.drain()
    }

    #[test]
    fn ranks_with_one_decimal_percentages() {
        let result = result_of(&[("c.png", 9), ("a.png", 2), ("b.png", 5)]);

        assert_eq!(
            format_report("ref.png", &result),
            "Images similar to ref.png:\n\
             1. a.png (96.9%)\n\
             2. b.png (92.2%)\n\
             3. c.png (85.9%)"
        );
    }

    #[test]
    fn exact_match_reads_as_one_hundred_percent() {
        let result = result_of(&[("twin.png", 0)]);
        assert!(format_report("ref.png", &result).ends_with("1. twin.png (100.0%)"));
    }

    #[test]
    fn exact_ties_round_like_the_formatter() {
        // 52/64 = 81.25 exactly
        let result = result_of(&[("twelve.png", 12)]);
        assert!(format_report("ref.png", &result).ends_with("1. twelve.png (81.2%)"));
    }

    #[test]
    fn empty_result_names_the_reference() {
        assert_eq!(
            format_report("ref.png", &RankedResult::default()),
            not_found_message("ref.png")
        );
        assert!(not_found_message("ref.png").contains("\"ref.png\""));
    }
}
