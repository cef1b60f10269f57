//! Help popup widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use super::popup::{render_scroll_popup, section};
use crate::tui::style::Styles;

const KEYS: &[(&str, &str)] = &[
    ("↑/k ↓/j", "Move focus"),
    ("PgUp/PgDn", "Move focus by a page"),
    ("Home/End", "First / last problem"),
    ("Enter", "Show problem details"),
    ("Space", "Select / deselect problem"),
    ("m", "Actions for the focused problem"),
    ("f", "Apply the first quick fix"),
];

const FILTER_KEYS: &[(&str, &str)] = &[
    ("/", "Edit the filter (Enter keeps, Esc reverts)"),
    ("Esc", "Clear the filter"),
    ("e w i", "Show / hide errors, warnings, infos"),
];

const OTHER_KEYS: &[(&str, &str)] = &[
    ("r", "Reload the markers file"),
    ("h", "Hide / show the table"),
    ("?", "Toggle this help"),
    ("q", "Quit"),
];

fn key_lines(keys: &[(&str, &str)]) -> Vec<Line<'static>> {
    keys.iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {:<12}", key), Styles::help_key()),
                Span::styled(desc.to_string(), Styles::help()),
            ])
        })
        .collect()
}

fn help_content() -> Vec<Line<'static>> {
    let mut lines = vec![section("Navigation")];
    lines.extend(key_lines(KEYS));
    lines.push(Line::from(""));
    lines.push(section("Filtering"));
    lines.extend(key_lines(FILTER_KEYS));
    lines.push(Line::from(Span::styled(
        "  Text matches message, source, code, file and owner.",
        Styles::help(),
    )));
    lines.push(Line::from(Span::styled(
        "  A leading ! shows problems that do NOT match.",
        Styles::help(),
    )));
    lines.push(Line::from(Span::styled(
        "  Comma separated terms select files: src/lib.rs, !target",
        Styles::help(),
    )));
    lines.push(Line::from(""));
    lines.push(section("Other"));
    lines.extend(key_lines(OTHER_KEYS));
    lines.push(Line::from(""));
    lines.push(section("Mouse"));
    lines.push(Line::from(Span::styled(
        "  Rest the pointer on a row to look up its quick fixes.",
        Styles::help(),
    )));
    lines.push(Line::from(Span::styled(
        "  Click focuses, right click opens actions, wheel scrolls.",
        Styles::help(),
    )));
    lines
}

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    let footer = Line::from(vec![
        Span::styled("↑/↓", Styles::help_key()),
        Span::styled(" scroll  ", Styles::help()),
        Span::styled("?", Styles::help_key()),
        Span::styled("/", Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" close", Styles::help()),
    ]);
    render_scroll_popup(frame, area, "markview help", help_content(), scroll, footer);
}
