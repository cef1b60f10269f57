//! UI-agnostic cell presentation.
//!
//! Renderers produce these; the TUI maps them to ratatui spans, a different
//! frontend would map them to its own styling.

use crate::filter::MatchSpan;
use crate::model::MarkerSeverity;

/// Style class of a text segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentStyle {
    #[default]
    Normal,
    /// Matched the text filter.
    Highlight,
    /// Secondary information (source, position).
    Dimmed,
    /// Navigable code link.
    Link,
    /// Severity icon.
    Severity(MarkerSeverity),
    /// Quick-fix affordance.
    QuickFix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: SegmentStyle,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Content of one table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub segments: Vec<Segment>,
    /// Hover/detail text, if the cell has any.
    pub tooltip: Option<String>,
}

impl Cell {
    pub fn push(&mut self, text: impl Into<String>, style: SegmentStyle) {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(Segment::new(text, style));
        }
    }

    /// Appends `text`, marking the `spans` ranges as highlighted and the rest
    /// with `base`.
    pub fn push_highlighted(&mut self, text: &str, spans: Option<&[MatchSpan]>, base: SegmentStyle) {
        let Some(spans) = spans.filter(|s| !s.is_empty()) else {
            self.push(text, base);
            return;
        };

        let chars: Vec<char> = text.chars().collect();
        let mut cursor = 0;
        for span in spans {
            let start = span.start.min(chars.len()).max(cursor);
            let end = span.end.min(chars.len());
            if start >= end {
                continue;
            }
            self.push(chars[cursor..start].iter().collect::<String>(), base);
            self.push(chars[start..end].iter().collect::<String>(), SegmentStyle::Highlight);
            cursor = end;
        }
        self.push(chars[cursor..].iter().collect::<String>(), base);
    }

    /// Concatenated text of all segments.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_splits_on_char_offsets() {
        let mut cell = Cell::default();
        cell.push_highlighted(
            "ünused foo",
            Some(&[MatchSpan::new(0, 2), MatchSpan::new(7, 10)]),
            SegmentStyle::Normal,
        );
        assert_eq!(
            cell.segments,
            vec![
                Segment::new("ün", SegmentStyle::Highlight),
                Segment::new("used ", SegmentStyle::Normal),
                Segment::new("foo", SegmentStyle::Highlight),
            ]
        );
    }

    #[test]
    fn out_of_range_spans_are_clamped() {
        let mut cell = Cell::default();
        cell.push_highlighted("abc", Some(&[MatchSpan::new(2, 9)]), SegmentStyle::Dimmed);
        assert_eq!(cell.text(), "abc");
        assert_eq!(cell.segments[1], Segment::new("c", SegmentStyle::Highlight));
    }

    #[test]
    fn no_spans_keeps_base_style() {
        let mut cell = Cell::default();
        cell.push_highlighted("abc", None, SegmentStyle::Link);
        assert_eq!(cell.segments, vec![Segment::new("abc", SegmentStyle::Link)]);
    }
}
