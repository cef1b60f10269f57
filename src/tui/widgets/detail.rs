//! Marker detail popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use super::popup::{kv, render_scroll_popup, section};
use crate::label::LabelFormatter;
use crate::model::{Marker, MarkerCode};
use crate::quickfix::QuickFixProvider;
use crate::tui::style::Styles;
use crate::view::SegmentStyle;
use crate::view::renderers::{QUICK_FIX_ICON, severity_icon};

fn build_content(
    marker: &Marker,
    labels: &dyn LabelFormatter,
    quick_fixes: &dyn QuickFixProvider,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("{} {}", severity_icon(marker.severity), marker.severity.label()),
        Styles::severity(marker.severity),
    ))];
    lines.push(Line::from(""));
    for text in marker.message.lines() {
        lines.push(Line::from(text.to_string()));
    }
    lines.push(Line::from(""));

    lines.push(section("Location"));
    lines.push(kv("File", labels.label(&marker.resource)));
    lines.push(kv(
        "Range",
        format!(
            "Ln {}, Col {} - Ln {}, Col {}",
            marker.start_line, marker.start_column, marker.end_line, marker.end_column
        ),
    ));
    if !marker.owner.is_empty() {
        lines.push(kv("Owner", marker.owner.clone()));
    }
    if let Some(source) = &marker.source {
        lines.push(kv("Source", source.clone()));
    }
    match &marker.code {
        Some(MarkerCode::Plain(code)) => lines.push(kv("Code", code.clone())),
        Some(MarkerCode::Link { value, target }) => {
            lines.push(kv("Code", value.clone()));
            lines.push(Line::from(vec![
                Span::raw(format!("{:>12}", "")),
                Span::styled(target.clone(), Styles::from_segment(SegmentStyle::Link)),
            ]));
        }
        None => {}
    }

    if !marker.related_information.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("Related"));
        for related in &marker.related_information {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(
                        "  {} [Ln {}, Col {}]: ",
                        labels.label(&related.resource),
                        related.start_line,
                        related.start_column
                    ),
                    Styles::dim(),
                ),
                Span::raw(related.message.clone()),
            ]));
        }
    }

    let fixes = quick_fixes.quick_fixes(marker);
    if quick_fixes.quick_fix_enabled(marker) && !fixes.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("Quick Fixes"));
        for title in fixes {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} ", QUICK_FIX_ICON),
                    Styles::from_segment(SegmentStyle::QuickFix),
                ),
                Span::raw(title.clone()),
            ]));
        }
    }
    lines
}

/// Renders the detail popup for `marker`.
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    marker: &Marker,
    labels: &dyn LabelFormatter,
    quick_fixes: &dyn QuickFixProvider,
    scroll: &mut usize,
) {
    let title = format!("Problem: {}", marker.resource.file_name());
    let footer = Line::from(vec![
        Span::styled("↑/↓", Styles::help_key()),
        Span::styled(" scroll  ", Styles::help()),
        Span::styled("f", Styles::help_key()),
        Span::styled(" quick fix  ", Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" close", Styles::help()),
    ]);
    let content = build_content(marker, labels, quick_fixes);
    render_scroll_popup(frame, area, &title, content, scroll, footer);
}
