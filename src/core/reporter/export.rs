//! JSON export of a search outcome.

use super::similarity_label;
use crate::core::comparator::MatchType;
use crate::core::hasher::HashVariant;
use crate::core::search::{SearchOutcome, SearchState};
use crate::events::SearchSummary;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

/// One ranked match as exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub rank: usize,
    pub path: PathBuf,
    pub distance: u32,
    /// Rounded to one decimal, as shown in the text report
    pub similarity: f64,
    pub match_type: MatchType,
}

/// Serializable view of a finished search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    pub reference: PathBuf,
    pub variant: HashVariant,
    pub ended_with: SearchState,
    pub matches: Vec<MatchView>,
    pub summary: SearchSummary,
}

impl ReportView {
    pub fn new(reference: PathBuf, variant: HashVariant, outcome: &SearchOutcome) -> Self {
        let matches = outcome
            .result
            .iter()
            .enumerate()
            .map(|(i, m)| MatchView {
                rank: i + 1,
                path: m.path.clone(),
                distance: m.distance,
                similarity: similarity_label(m)
                    .parse()
                    .unwrap_or_else(|_| m.similarity_percent()),
                match_type: m.match_type(),
            })
            .collect();

        Self {
            reference,
            variant,
            ended_with: outcome.ended_with,
            matches,
            summary: outcome.summary.clone(),
        }
    }
}

/// Write the view as pretty-printed JSON followed by a newline
pub fn export_json<W: Write>(view: &ReportView, mut writer: W) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, view)?;
    writeln!(writer)
}
