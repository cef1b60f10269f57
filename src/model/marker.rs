//! Marker records: one diagnostic with location, message and metadata.

use serde::Deserialize;

use super::Resource;

/// Marker severity. Declaration order is the sort rank: errors first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSeverity {
    Error,
    Warning,
    #[serde(alias = "information")]
    Info,
}

impl MarkerSeverity {
    pub fn all() -> &'static [MarkerSeverity] {
        &[
            MarkerSeverity::Error,
            MarkerSeverity::Warning,
            MarkerSeverity::Info,
        ]
    }

    /// Numeric rank used for sorting (Error < Warning < Info).
    pub fn rank(self) -> u8 {
        match self {
            MarkerSeverity::Error => 0,
            MarkerSeverity::Warning => 1,
            MarkerSeverity::Info => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarkerSeverity::Error => "Error",
            MarkerSeverity::Warning => "Warning",
            MarkerSeverity::Info => "Info",
        }
    }
}

/// Diagnostic code: either plain text or a link to documentation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MarkerCode {
    Plain(String),
    Link { value: String, target: String },
}

impl MarkerCode {
    /// Text shown in the table and used for text filtering.
    pub fn value(&self) -> &str {
        match self {
            MarkerCode::Plain(value) | MarkerCode::Link { value, .. } => value,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            MarkerCode::Plain(_) => None,
            MarkerCode::Link { target, .. } => Some(target),
        }
    }
}

/// A secondary location attached to a marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedInformation {
    pub resource: Resource,
    pub message: String,
    #[serde(default = "first_position")]
    pub start_line: u32,
    #[serde(default = "first_position")]
    pub start_column: u32,
}

fn first_position() -> u32 {
    1
}

/// One diagnostic entry.
///
/// Positions are 1-based, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub id: String,
    pub owner: String,
    pub resource: Resource,
    pub severity: MarkerSeverity,
    pub message: String,
    pub source: Option<String>,
    pub code: Option<MarkerCode>,
    pub related_information: Vec<RelatedInformation>,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Marker {
    /// Creates a marker with only the required fields; the rest can be filled
    /// in with struct update syntax.
    pub fn new(
        id: impl Into<String>,
        resource: Resource,
        severity: MarkerSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            owner: String::new(),
            resource,
            severity,
            message: message.into(),
            source: None,
            code: None,
            related_information: Vec::new(),
            start_line: 1,
            start_column: 1,
            end_line: 1,
            end_column: 1,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_code(mut self, code: MarkerCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.start_line = line;
        self.start_column = column;
        self.end_line = self.end_line.max(line);
        self.end_column = self.end_column.max(column);
        self
    }
}
