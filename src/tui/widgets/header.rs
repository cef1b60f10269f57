//! Header widget: source, severity toggles, filter.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::MarkerSeverity;
use crate::table::MarkersView;
use crate::tui::state::{AppState, InputMode};
use crate::tui::style::Styles;
use crate::view::renderers::severity_icon;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Min(20),    // Source
        Constraint::Length(24), // Severity toggles
        Constraint::Length(22), // Counts
        Constraint::Length(40), // Filter/Status
    ])
    .split(area);

    // Source and load time
    let loaded = state
        .loaded_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    let source = format!(" markview  {}  {}", state.source_name, loaded);
    frame.render_widget(Paragraph::new(source).style(Styles::header()), chunks[0]);

    // Severity toggles: hidden severities are struck through.
    let counts = state.table.severity_counts();
    let toggles: Vec<Span> = MarkerSeverity::all()
        .iter()
        .map(|&severity| {
            let text = format!(
                " {} {} ",
                severity_icon(severity),
                counts[severity.rank() as usize]
            );
            let style = if state.shows(severity) {
                Styles::severity(severity)
            } else {
                Styles::dim().add_modifier(Modifier::CROSSED_OUT)
            };
            Span::styled(text, style)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(toggles)).style(Styles::header()),
        chunks[1],
    );

    // Counts
    frame.render_widget(
        Paragraph::new(state.table.aria_label().to_string()).style(Styles::header()),
        chunks[2],
    );

    // Filter input, or status message
    let (right_content, right_style) = if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::status())
    } else {
        match state.input_mode {
            InputMode::Filter => (
                format!("Filter: {}█", state.filter_input),
                Styles::filter_input(),
            ),
            InputMode::Normal if !state.filter.is_empty() => {
                (format!("/{}", state.filter), Styles::header())
            }
            InputMode::Normal if !state.table.is_visible() => {
                ("hidden".to_string(), Styles::header())
            }
            InputMode::Normal => (String::new(), Styles::header()),
        }
    };
    frame.render_widget(Paragraph::new(right_content).style(right_style), chunks[3]);
}
