//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::{AppState, PopupState};
use super::widgets::{
    render_context_menu, render_detail, render_header, render_help, render_markers,
    render_quit_confirm,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Problems table
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_markers(frame, chunks[1], state);

    // Popups are rendered last to overlay everything.
    let mut popup = std::mem::take(&mut state.popup);
    match &mut popup {
        PopupState::None => {}
        PopupState::Help { scroll } => render_help(frame, area, scroll),
        PopupState::Detail { marker, scroll } => render_detail(
            frame,
            area,
            marker,
            state.table.labels(),
            &state.quick_fixes,
            scroll,
        ),
        PopupState::ContextMenu { marker, selected } => {
            let items = state.context_menu_items(marker);
            let title = format!("{} [Ln {}]", marker.resource.file_name(), marker.start_line);
            render_context_menu(frame, area, &title, &items, *selected);
        }
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
    }
    state.popup = popup;
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::label::WorkspaceLabels;
    use crate::model::{Marker, MarkerSeverity, Resource, ResourceMarkers};
    use crate::quickfix::QuickFixRegistry;
    use crate::table::MarkerTable;
    use crate::tui::state::ViewConfig;

    fn state(groups: Vec<ResourceMarkers>) -> AppState {
        let mut state = AppState::new(
            MarkerTable::with_labels(WorkspaceLabels::new(Some("/ws".into()))),
            QuickFixRegistry::new(HashMap::new()),
            ViewConfig::default(),
        );
        state.source_name = "markers.json".to_string();
        state.load(groups);
        state
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_rows_and_header() {
        let resource = Resource::new("file:///ws/src/lib.rs");
        let mut state = state(vec![ResourceMarkers::new(
            resource.clone(),
            vec![
                Marker::new("m1", resource.clone(), MarkerSeverity::Error, "mismatched types")
                    .with_source("rustc")
                    .at(12, 9),
            ],
        )]);

        let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        let text = screen(&terminal);

        assert!(text.contains("markers.json"));
        assert!(text.contains("Problems: 1 of 1"));
        assert!(text.contains("mismatched types rustc"));
        assert!(text.contains("src/lib.rs [Ln 12, Col 9]"));
        // Border, column header, first row.
        assert_eq!(state.table_body.y, 3);
        assert_eq!(state.table.row_at(0), Some(0));
    }

    #[test]
    fn settled_hover_shows_cell_tooltip() {
        let resource = Resource::new("file:///ws/src/lib.rs");
        let mut state = state(vec![ResourceMarkers::new(
            resource.clone(),
            vec![Marker::new("m1", resource, MarkerSeverity::Error, "mismatched types")],
        )]);
        let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        assert!(!screen(&terminal).contains("file:///ws/src/lib.rs"));

        let t0 = std::time::Instant::now();
        state.table.mouse_over(0, t0);
        assert!(
            state
                .table
                .tick(t0 + std::time::Duration::from_millis(500), &mut state.quick_fixes)
        );
        let widths = state.table.column_widths().to_vec();
        state.pointer_column = Some(widths[0] + widths[1] + 2);

        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        assert!(screen(&terminal).contains("file:///ws/src/lib.rs"));
    }

    #[test]
    fn renders_empty_message_and_popups() {
        let mut state = state(Vec::new());
        state.popup = PopupState::Help { scroll: 0 };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("markview help"));

        state.popup = PopupState::None;
        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        assert!(screen(&terminal).contains("No problems have been detected."));

        state.popup = PopupState::QuitConfirm;
        terminal.draw(|frame| render(frame, &mut state)).unwrap();
        assert!(screen(&terminal).contains("Quit markview?"));
    }
}
