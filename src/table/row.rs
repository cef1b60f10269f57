//! Row items of the problems table.

use std::sync::Arc;

use crate::filter::MatchSpan;
use crate::model::{Marker, MarkerSeverity};

/// One table row: a marker plus the spans that matched the text filter.
///
/// Rows are rebuilt on every reset; they carry no identity of their own.
#[derive(Debug, Clone)]
pub struct MarkerRow {
    pub marker: Arc<Marker>,
    pub source_matches: Option<Vec<MatchSpan>>,
    pub code_matches: Option<Vec<MatchSpan>>,
    pub message_matches: Option<Vec<MatchSpan>>,
    pub file_matches: Option<Vec<MatchSpan>>,
    pub owner_matches: Option<Vec<MatchSpan>>,
}

impl MarkerRow {
    pub fn new(marker: Arc<Marker>) -> Self {
        Self {
            marker,
            source_matches: None,
            code_matches: None,
            message_matches: None,
            file_matches: None,
            owner_matches: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.marker.id
    }

    pub fn severity(&self) -> MarkerSeverity {
        self.marker.severity
    }

    pub fn has_matches(&self) -> bool {
        [
            &self.source_matches,
            &self.code_matches,
            &self.message_matches,
            &self.file_matches,
            &self.owner_matches,
        ]
        .iter()
        .any(|m| m.as_ref().is_some_and(|spans| !spans.is_empty()))
    }
}
