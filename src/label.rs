//! Human-readable labels for resources.

use std::path::{Path, PathBuf};

use crate::model::Resource;

/// Formats resource locators for display and filtering.
pub trait LabelFormatter {
    /// Path relative to the workspace root, if the resource lives under it.
    fn relative_path(&self, resource: &Resource) -> Option<String>;

    /// Label shown in the file column: the relative path when there is one,
    /// the plain path for other files, the full locator for anything else.
    fn label(&self, resource: &Resource) -> String {
        if let Some(relative) = self.relative_path(resource) {
            return relative;
        }
        if resource.is_file() {
            resource.path().to_string()
        } else {
            resource.as_str().to_string()
        }
    }
}

/// Labels relative to an optional workspace root.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceLabels {
    root: Option<PathBuf>,
}

impl WorkspaceLabels {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

impl LabelFormatter for WorkspaceLabels {
    fn relative_path(&self, resource: &Resource) -> Option<String> {
        let root = self.root.as_ref()?;
        if !resource.is_file() {
            return None;
        }
        let relative = Path::new(resource.path()).strip_prefix(root).ok()?;
        let relative = relative.to_string_lossy();
        (!relative.is_empty()).then(|| relative.into_owned())
    }
}
