//! Per-column cell renderers.
//!
//! Each renderer formats one column of a [`MarkerRow`]. They are registered by
//! template id and resolved once when the table is built, so any of them can be
//! swapped out by registering a replacement under the same id.

use std::collections::HashMap;

use super::cell::{Cell, SegmentStyle};
use crate::label::LabelFormatter;
use crate::model::{MarkerCode, MarkerSeverity};
use crate::quickfix::QuickFixProvider;
use crate::table::MarkerRow;

/// Appended to messages that have more than one line.
pub const CONTINUATION_MARK: &str = "…";

/// Services renderers may consult.
pub struct RenderContext<'a> {
    pub labels: &'a dyn LabelFormatter,
    pub quick_fixes: &'a dyn QuickFixProvider,
}

pub trait CellRenderer {
    fn template_id(&self) -> &'static str;

    fn render(&self, row: &MarkerRow, ctx: &RenderContext<'_>) -> Cell;
}

pub fn severity_icon(severity: MarkerSeverity) -> &'static str {
    match severity {
        MarkerSeverity::Error => "✖",
        MarkerSeverity::Warning => "⚠",
        MarkerSeverity::Info => "ℹ",
    }
}

pub const QUICK_FIX_ICON: &str = "⚡";

/// Severity icon plus the quick-fix affordance when fixes are enabled.
#[derive(Debug, Default)]
pub struct SeverityRenderer;

impl CellRenderer for SeverityRenderer {
    fn template_id(&self) -> &'static str {
        "severity"
    }

    fn render(&self, row: &MarkerRow, ctx: &RenderContext<'_>) -> Cell {
        let marker = &row.marker;
        let mut cell = Cell {
            tooltip: Some(marker.severity.label().to_string()),
            ..Cell::default()
        };
        cell.push(
            severity_icon(marker.severity),
            SegmentStyle::Severity(marker.severity),
        );
        if ctx.quick_fixes.quick_fix_enabled(marker) {
            cell.push(" ", SegmentStyle::Normal);
            cell.push(QUICK_FIX_ICON, SegmentStyle::QuickFix);
            let fixes = ctx.quick_fixes.quick_fixes(marker);
            cell.tooltip = Some(format!("Quick Fix... ({})", fixes.len()));
        }
        cell
    }
}

/// Message, then `source(code)` when present.
#[derive(Debug, Default)]
pub struct MessageRenderer;

impl CellRenderer for MessageRenderer {
    fn template_id(&self) -> &'static str {
        "message"
    }

    fn render(&self, row: &MarkerRow, _ctx: &RenderContext<'_>) -> Cell {
        let marker = &row.marker;
        let mut cell = Cell {
            tooltip: Some(marker.message.clone()),
            ..Cell::default()
        };
        // Multi-line messages show their first line and a continuation mark,
        // highlighted when the filter matched past the first line.
        let first_line = marker.message.lines().next().unwrap_or_default();
        cell.push_highlighted(
            first_line,
            row.message_matches.as_deref(),
            SegmentStyle::Normal,
        );
        if first_line.len() < marker.message.trim_end().len() {
            let shown = first_line.chars().count();
            let hidden_match = row
                .message_matches
                .as_deref()
                .is_some_and(|spans| spans.iter().any(|s| s.end > shown));
            let style = if hidden_match {
                SegmentStyle::Highlight
            } else {
                SegmentStyle::Dimmed
            };
            cell.push(" ", SegmentStyle::Normal);
            cell.push(CONTINUATION_MARK, style);
        }

        if marker.source.is_none() && marker.code.is_none() {
            return cell;
        }
        cell.push(" ", SegmentStyle::Normal);
        if let Some(source) = &marker.source {
            cell.push_highlighted(source, row.source_matches.as_deref(), SegmentStyle::Dimmed);
        }
        if let Some(code) = &marker.code {
            cell.push("(", SegmentStyle::Dimmed);
            let style = match code {
                MarkerCode::Plain(_) => SegmentStyle::Dimmed,
                MarkerCode::Link { .. } => SegmentStyle::Link,
            };
            cell.push_highlighted(code.value(), row.code_matches.as_deref(), style);
            cell.push(")", SegmentStyle::Dimmed);
        }
        cell
    }
}

/// Workspace-relative path and `[Ln L, Col C]`.
#[derive(Debug, Default)]
pub struct FileRenderer;

impl CellRenderer for FileRenderer {
    fn template_id(&self) -> &'static str {
        "file"
    }

    fn render(&self, row: &MarkerRow, ctx: &RenderContext<'_>) -> Cell {
        let marker = &row.marker;
        let label = ctx.labels.label(&marker.resource);
        let mut cell = Cell {
            tooltip: Some(marker.resource.to_string()),
            ..Cell::default()
        };
        cell.push_highlighted(&label, row.file_matches.as_deref(), SegmentStyle::Normal);
        cell.push(
            format!(" [Ln {}, Col {}]", marker.start_line, marker.start_column),
            SegmentStyle::Dimmed,
        );
        cell
    }
}

/// Owner (the component that reported the marker).
#[derive(Debug, Default)]
pub struct OwnerRenderer;

impl CellRenderer for OwnerRenderer {
    fn template_id(&self) -> &'static str {
        "owner"
    }

    fn render(&self, row: &MarkerRow, _ctx: &RenderContext<'_>) -> Cell {
        let mut cell = Cell::default();
        cell.push_highlighted(
            &row.marker.owner,
            row.owner_matches.as_deref(),
            SegmentStyle::Dimmed,
        );
        cell
    }
}

/// Renderers by template id.
pub struct RendererRegistry {
    renderers: HashMap<&'static str, Box<dyn CellRenderer>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(SeverityRenderer));
        registry.register(Box::new(MessageRenderer));
        registry.register(Box::new(FileRenderer));
        registry.register(Box::new(OwnerRenderer));
        registry
    }
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registers `renderer`, replacing any previous one with the same id.
    pub fn register(&mut self, renderer: Box<dyn CellRenderer>) {
        self.renderers.insert(renderer.template_id(), renderer);
    }

    pub fn take(&mut self, template_id: &str) -> Option<Box<dyn CellRenderer>> {
        self.renderers.remove(template_id)
    }
}
