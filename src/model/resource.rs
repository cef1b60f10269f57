//! Resource locators (`scheme://path` URIs).

use std::fmt;

use serde::Deserialize;

/// Scheme of the interactive walkthrough pages.
pub const WALKTHROUGH_SCHEME: &str = "walkThrough";
/// Scheme of code snippets embedded in walkthrough pages.
pub const WALKTHROUGH_SNIPPET_SCHEME: &str = "walkThroughSnippet";

const FILE_SCHEME: &str = "file";

/// Locator of the resource a marker belongs to.
///
/// Stored as the original URI text. Bare paths (no scheme) are treated as
/// `file` resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Resource(String);

impl Resource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the URI scheme, `file` for bare paths.
    pub fn scheme(&self) -> &str {
        match self.scheme_end() {
            Some(end) => &self.0[..end],
            None => FILE_SCHEME,
        }
    }

    /// Returns the path component (authority stripped).
    pub fn path(&self) -> &str {
        let Some(end) = self.scheme_end() else {
            return &self.0;
        };
        let rest = &self.0[end + 1..];
        match rest.strip_prefix("//") {
            Some(after) => after.find('/').map(|i| &after[i..]).unwrap_or(""),
            None => rest,
        }
    }

    /// Last path segment.
    pub fn file_name(&self) -> &str {
        self.path().rsplit('/').next().unwrap_or_default()
    }

    pub fn is_file(&self) -> bool {
        self.scheme() == FILE_SCHEME
    }

    /// Walkthrough pages and their snippets never show up in the problems table.
    pub fn is_walkthrough(&self) -> bool {
        matches!(
            self.scheme(),
            WALKTHROUGH_SCHEME | WALKTHROUGH_SNIPPET_SCHEME
        )
    }

    /// Byte offset of the `:` ending the scheme, if the text has one.
    ///
    /// A single letter before `:` is a Windows drive, not a scheme.
    fn scheme_end(&self) -> Option<usize> {
        let end = self.0.find(':')?;
        let scheme = &self.0[..end];
        let valid = scheme.len() > 1
            && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        valid.then_some(end)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Resource {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_uri_components() {
        let r = Resource::new("file:///home/dev/project/src/main.rs");
        assert_eq!(r.scheme(), "file");
        assert_eq!(r.path(), "/home/dev/project/src/main.rs");
        assert_eq!(r.file_name(), "main.rs");
        assert!(r.is_file());
    }

    #[test]
    fn bare_path_is_file() {
        let r = Resource::new("/tmp/a.rs");
        assert_eq!(r.scheme(), "file");
        assert_eq!(r.path(), "/tmp/a.rs");

        let drive = Resource::new("C:/work/a.rs");
        assert_eq!(drive.scheme(), "file");
        assert_eq!(drive.path(), "C:/work/a.rs");
    }

    #[test]
    fn walkthrough_schemes() {
        assert!(Resource::new("walkThrough:/intro.md").is_walkthrough());
        assert!(Resource::new("walkThroughSnippet:/intro.md#1").is_walkthrough());
        assert!(!Resource::new("untitled:Untitled-1").is_walkthrough());
        assert_eq!(Resource::new("untitled:Untitled-1").path(), "Untitled-1");
    }
}
