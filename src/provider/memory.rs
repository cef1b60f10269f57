//! In-memory provider.

use super::{MarkerProvider, ProviderError, QuickFixMap, changed_groups};
use crate::model::ResourceMarkers;

/// Serves a fixed dataset; `replace` stages the next one for `reload`.
#[derive(Debug, Default)]
pub struct StaticProvider {
    groups: Vec<ResourceMarkers>,
    quick_fixes: QuickFixMap,
    staged: Option<Vec<ResourceMarkers>>,
}

impl StaticProvider {
    pub fn new(groups: Vec<ResourceMarkers>, quick_fixes: QuickFixMap) -> Self {
        Self {
            groups,
            quick_fixes,
            staged: None,
        }
    }

    pub fn replace(&mut self, groups: Vec<ResourceMarkers>) {
        self.staged = Some(groups);
    }
}

impl MarkerProvider for StaticProvider {
    fn groups(&self) -> &[ResourceMarkers] {
        &self.groups
    }

    fn quick_fixes(&self) -> &QuickFixMap {
        &self.quick_fixes
    }

    fn reload(&mut self) -> Result<Vec<ResourceMarkers>, ProviderError> {
        let Some(next) = self.staged.take() else {
            return Ok(Vec::new());
        };
        let changed = changed_groups(&self.groups, &next);
        self.groups = next;
        Ok(changed)
    }

    fn has_changed(&self) -> bool {
        self.staged.is_some()
    }

    fn name(&self) -> String {
        "memory".to_string()
    }

    fn last_error(&self) -> Option<&ProviderError> {
        None
    }
}
