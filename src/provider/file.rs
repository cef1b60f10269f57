//! Markers loaded from a JSON file.
//!
//! ```json
//! {
//!   "groups": [
//!     { "resource": "file:///ws/src/lib.rs",
//!       "markers": [ { "severity": "error", "message": "...", "startLine": 3 } ] }
//!   ],
//!   "quickFixes": { "<marker id>": ["Remove import"] }
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{MarkerProvider, ProviderError, QuickFixMap, changed_groups};
use crate::model::{Marker, MarkerCode, MarkerSeverity, RelatedInformation, Resource, ResourceMarkers};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkersFile {
    #[serde(default)]
    groups: Vec<GroupEntry>,
    #[serde(default)]
    quick_fixes: QuickFixMap,
}

#[derive(Debug, Deserialize)]
struct GroupEntry {
    resource: Resource,
    #[serde(default)]
    markers: Vec<MarkerEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkerEntry {
    id: Option<String>,
    #[serde(default)]
    owner: String,
    severity: MarkerSeverity,
    message: String,
    source: Option<String>,
    code: Option<MarkerCode>,
    #[serde(default)]
    related_information: Vec<RelatedInformation>,
    #[serde(default = "first_position")]
    start_line: u32,
    #[serde(default = "first_position")]
    start_column: u32,
    end_line: Option<u32>,
    end_column: Option<u32>,
}

fn first_position() -> u32 {
    1
}

impl MarkerEntry {
    fn into_marker(self, resource: &Resource, index: usize) -> Marker {
        Marker {
            id: self.id.unwrap_or_else(|| format!("{resource}#{index}")),
            owner: self.owner,
            resource: resource.clone(),
            severity: self.severity,
            message: self.message,
            source: self.source.filter(|s| !s.is_empty()),
            code: self.code.filter(|c| !c.value().is_empty()),
            related_information: self.related_information,
            start_line: self.start_line,
            start_column: self.start_column,
            end_line: self.end_line.unwrap_or(self.start_line),
            end_column: self.end_column.unwrap_or(self.start_column),
        }
    }
}

/// Parses a markers document.
///
/// Markers without an id get `<resource>#<index>`. A resource listed twice
/// keeps its last entry.
pub fn parse_markers(json: &str) -> Result<(Vec<ResourceMarkers>, QuickFixMap), ProviderError> {
    let file: MarkersFile = serde_json::from_str(json)
        .map_err(|e| ProviderError::Parse(e.to_string()))?;

    let mut groups: Vec<ResourceMarkers> = Vec::with_capacity(file.groups.len());
    for entry in file.groups {
        let resource = entry.resource;
        let markers = entry
            .markers
            .into_iter()
            .enumerate()
            .map(|(i, m)| m.into_marker(&resource, i))
            .collect();
        let group = ResourceMarkers::new(resource, markers);
        match groups.iter_mut().find(|g| g.resource == group.resource) {
            Some(existing) => {
                warn!(resource = %group.resource, "duplicate resource, keeping last entry");
                *existing = group;
            }
            None => groups.push(group),
        }
    }

    let mut seen = HashSet::new();
    for marker in groups.iter().flat_map(|g| g.markers.iter()) {
        if !seen.insert(marker.id.as_str()) {
            warn!(marker = %marker.id, "duplicate marker id");
        }
    }

    Ok((groups, file.quick_fixes))
}

/// Provider backed by a markers file.
#[derive(Debug)]
pub struct FileProvider {
    path: PathBuf,
    groups: Vec<ResourceMarkers>,
    quick_fixes: QuickFixMap,
    modified: Option<SystemTime>,
    loaded_at: Option<DateTime<Local>>,
    last_error: Option<ProviderError>,
}

impl FileProvider {
    /// Loads the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let mut provider = Self {
            path: path.as_ref().to_path_buf(),
            groups: Vec::new(),
            quick_fixes: QuickFixMap::new(),
            modified: None,
            loaded_at: None,
            last_error: None,
        };
        provider.load()?;
        Ok(provider)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }

    fn load(&mut self) -> Result<Vec<ResourceMarkers>, ProviderError> {
        // Recorded before parsing so a broken file is retried only after it
        // is written again.
        self.modified = self.modified_time();
        let text = fs::read_to_string(&self.path)
            .map_err(|e| ProviderError::Io(format!("{}: {}", self.path.display(), e)))?;
        let (groups, quick_fixes) = parse_markers(&text)?;

        let changed = changed_groups(&self.groups, &groups);
        info!(
            path = %self.path.display(),
            groups = groups.len(),
            changed = changed.len(),
            "markers loaded"
        );
        self.groups = groups;
        self.quick_fixes = quick_fixes;
        self.loaded_at = Some(Local::now());
        Ok(changed)
    }
}

impl MarkerProvider for FileProvider {
    fn groups(&self) -> &[ResourceMarkers] {
        &self.groups
    }

    fn quick_fixes(&self) -> &QuickFixMap {
        &self.quick_fixes
    }

    fn reload(&mut self) -> Result<Vec<ResourceMarkers>, ProviderError> {
        match self.load() {
            Ok(changed) => {
                self.last_error = None;
                Ok(changed)
            }
            Err(e) => {
                warn!(error = %e, "reload failed, keeping previous markers");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn has_changed(&self) -> bool {
        let current = self.modified_time();
        let changed = current.is_some() && current != self.modified;
        if changed {
            debug!(path = %self.path.display(), "markers file modified");
        }
        changed
    }

    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }

    fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const SAMPLE: &str = r#"{
        "groups": [
            {
                "resource": "file:///ws/src/lib.rs",
                "markers": [
                    {
                        "id": "lib-1",
                        "owner": "rustc",
                        "severity": "error",
                        "message": "mismatched types",
                        "source": "rustc",
                        "code": { "value": "E0308", "target": "https://doc.rust-lang.org/error_codes/E0308.html" },
                        "startLine": 12,
                        "startColumn": 9,
                        "relatedInformation": [
                            { "resource": "file:///ws/src/main.rs", "message": "expected due to this", "startLine": 4 }
                        ]
                    },
                    { "severity": "information", "message": "consider borrowing", "code": "" }
                ]
            },
            { "resource": "file:///ws/src/main.rs" }
        ],
        "quickFixes": { "lib-1": ["Convert to u32"] }
    }"#;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn parses_groups_and_quick_fixes() {
        let (groups, fixes) = parse_markers(SAMPLE).unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups[1].is_empty());

        let first = &groups[0].markers[0];
        assert_eq!(first.id, "lib-1");
        assert_eq!(first.severity, MarkerSeverity::Error);
        assert!(first.code.as_ref().and_then(MarkerCode::target).is_some());
        assert_eq!((first.start_line, first.start_column), (12, 9));
        assert_eq!((first.end_line, first.end_column), (12, 9));
        assert_eq!(first.related_information[0].start_line, 4);
        assert_eq!(first.related_information[0].start_column, 1);

        let second = &groups[0].markers[1];
        assert_eq!(second.id, "file:///ws/src/lib.rs#1");
        assert_eq!(second.severity, MarkerSeverity::Info);
        assert!(second.code.is_none());
        assert_eq!(second.resource, groups[0].resource);

        assert_eq!(fixes["lib-1"], vec!["Convert to u32".to_string()]);
    }

    #[test]
    fn duplicate_resource_keeps_last() {
        let json = r#"{ "groups": [
            { "resource": "a.rs", "markers": [ { "severity": "error", "message": "old" } ] },
            { "resource": "a.rs", "markers": [ { "severity": "warning", "message": "new" } ] }
        ] }"#;
        let (groups, _) = parse_markers(json).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].markers[0].message, "new");
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = parse_markers(r#"{ "groups": [ { "markers": [] } ] }"#).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
        let err = parse_markers(r#"{ "groups": [ { "resource": "a", "markers": [ { "severity": "fatal", "message": "x" } ] } ] }"#)
            .unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileProvider::open(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ProviderError::Io(_)));
    }

    #[test]
    fn reload_reports_changed_groups() {
        let file = write_file(SAMPLE);
        let mut provider = FileProvider::open(file.path()).unwrap();
        assert_eq!(provider.groups().len(), 2);
        assert!(provider.loaded_at().is_some());

        // Unchanged content: nothing to update.
        assert!(provider.reload().unwrap().is_empty());

        fs::write(
            file.path(),
            r#"{ "groups": [ { "resource": "file:///ws/src/lib.rs", "markers": [] } ] }"#,
        )
        .unwrap();
        let changed = provider.reload().unwrap();
        let resources: Vec<&str> = changed.iter().map(|g| g.resource.as_str()).collect();
        assert_eq!(resources, vec!["file:///ws/src/lib.rs", "file:///ws/src/main.rs"]);
        assert!(changed.iter().all(ResourceMarkers::is_empty));
        assert!(provider.quick_fixes().is_empty());
    }

    fn write_with_mtime(path: &Path, contents: &str, secs: u64) {
        fs::write(path, contents).unwrap();
        let file = fs::OpenOptions::new().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn failed_reload_waits_for_next_modification() {
        let file = write_file(SAMPLE);
        let mut provider = FileProvider::open(file.path()).unwrap();
        assert!(!provider.has_changed());

        write_with_mtime(file.path(), "{ not json", 1_000_000);
        assert!(provider.has_changed());
        assert!(provider.reload().is_err());

        let mut attempts = 0;
        for _ in 0..5 {
            if provider.has_changed() {
                attempts += 1;
                let _ = provider.reload();
            }
        }
        assert_eq!(attempts, 0);
        assert!(provider.last_error().is_some());

        write_with_mtime(file.path(), SAMPLE, 2_000_000);
        assert!(provider.has_changed());
        assert!(provider.reload().is_ok());
        assert!(provider.last_error().is_none());
        assert!(!provider.has_changed());
    }

    #[test]
    fn failed_reload_keeps_previous_data() {
        let file = write_file(SAMPLE);
        let mut provider = FileProvider::open(file.path()).unwrap();
        fs::write(file.path(), "{ not json").unwrap();

        assert!(provider.reload().is_err());
        assert!(provider.last_error().is_some());
        assert_eq!(provider.groups().len(), 2);

        fs::write(file.path(), SAMPLE).unwrap();
        assert!(provider.reload().unwrap().is_empty());
        assert!(provider.last_error().is_none());
    }
}
