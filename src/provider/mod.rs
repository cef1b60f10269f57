//! Marker data sources.
//!
//! The TUI works against [`MarkerProvider`] so the dataset can come from a
//! markers file on disk or from memory.

mod file;
mod memory;

pub use file::{FileProvider, parse_markers};
pub use memory::StaticProvider;

use std::collections::HashMap;

use chrono::{DateTime, Local};

use crate::model::ResourceMarkers;

/// Error types that can occur while loading markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// I/O error while reading the source.
    Io(String),
    /// The source was read but its content is malformed.
    Parse(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Io(msg) => write!(f, "I/O error: {}", msg),
            ProviderError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Quick fix titles keyed by marker id.
pub type QuickFixMap = HashMap<String, Vec<String>>;

/// Abstraction over marker data sources.
pub trait MarkerProvider {
    /// All groups from the last successful load.
    fn groups(&self) -> &[ResourceMarkers];

    /// Quick fixes from the last successful load.
    fn quick_fixes(&self) -> &QuickFixMap;

    /// Loads the source again and returns the groups whose content changed.
    /// Groups that disappeared are returned empty so `update` clears them.
    ///
    /// On error the previous data is kept.
    fn reload(&mut self) -> Result<Vec<ResourceMarkers>, ProviderError>;

    /// Returns `true` if the source changed since the last load.
    fn has_changed(&self) -> bool {
        false
    }

    /// Short name shown in the header.
    fn name(&self) -> String;

    /// When the data was last loaded.
    fn loaded_at(&self) -> Option<DateTime<Local>> {
        None
    }

    /// Returns the last error that occurred, if any.
    fn last_error(&self) -> Option<&ProviderError>;
}

/// Groups of `next` that differ from `previous`, plus empty groups for
/// resources only `previous` has.
pub(crate) fn changed_groups(
    previous: &[ResourceMarkers],
    next: &[ResourceMarkers],
) -> Vec<ResourceMarkers> {
    let old: HashMap<_, _> = previous.iter().map(|g| (&g.resource, g)).collect();
    let mut changed: Vec<ResourceMarkers> = next
        .iter()
        .filter(|g| old.get(&g.resource).is_none_or(|o| *o != *g))
        .cloned()
        .collect();

    let kept: std::collections::HashSet<_> = next.iter().map(|g| &g.resource).collect();
    changed.extend(
        previous
            .iter()
            .filter(|g| !kept.contains(&g.resource))
            .map(|g| ResourceMarkers::empty(g.resource.clone())),
    );
    changed
}
