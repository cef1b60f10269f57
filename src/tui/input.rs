//! Input handling and keybindings.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::state::{AppState, InputMode, MenuItem, PopupState};
use crate::model::MarkerSeverity;
use crate::table::MarkersView;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Load the markers source again.
    Reload,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    state.status_message = None;
    let action = match state.popup {
        PopupState::QuitConfirm => handle_quit_confirm(state, key),
        PopupState::Help { .. } => handle_help(state, key),
        PopupState::Detail { .. } => handle_detail(state, key),
        PopupState::ContextMenu { .. } => handle_context_menu(state, key),
        PopupState::None => match state.input_mode {
            InputMode::Filter => handle_filter_mode(state, key),
            InputMode::Normal => handle_normal_mode(state, key),
        },
    };
    state.process_table_events();
    action
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        _ if is_ctrl_c(&key) => KeyAction::Quit,
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let PopupState::Help { scroll } = &mut state.popup else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => state.popup = PopupState::None,
        KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
        // Clamped during render
        KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
        KeyCode::PageUp => *scroll = scroll.saturating_sub(10),
        KeyCode::PageDown => *scroll = scroll.saturating_add(10),
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::None
}

fn handle_detail(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let PopupState::Detail { marker, scroll } = &mut state.popup else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => state.popup = PopupState::None,
        KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
        KeyCode::PageUp => *scroll = scroll.saturating_sub(10),
        KeyCode::PageDown => *scroll = scroll.saturating_add(10),
        KeyCode::Char('f') => {
            let marker = marker.clone();
            state.apply_quick_fix(&marker, 0);
        }
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::None
}

fn handle_context_menu(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let PopupState::ContextMenu { marker, selected } = &state.popup else {
        return KeyAction::None;
    };
    let marker = marker.clone();
    let selected = *selected;
    let items = state.context_menu_items(&marker);

    match key.code {
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => state.popup = PopupState::None,
        KeyCode::Up | KeyCode::Char('k') => {
            state.popup = PopupState::ContextMenu {
                marker,
                selected: selected.saturating_sub(1),
            };
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.popup = PopupState::ContextMenu {
                marker,
                selected: (selected + 1).min(items.len().saturating_sub(1)),
            };
        }
        KeyCode::Enter => {
            state.popup = PopupState::None;
            match items.get(selected) {
                Some(MenuItem::QuickFix { index, .. }) => state.apply_quick_fix(&marker, *index),
                Some(MenuItem::ShowDetails) => {
                    state.popup = PopupState::Detail { marker, scroll: 0 };
                }
                Some(MenuItem::ToggleSelection) => state.table.toggle_selection(),
                None => {}
            }
        }
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::None
}

/// Handles keys in filter mode. The filter applies as you type.
fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            // Restore the query from before editing.
            state.input_mode = InputMode::Normal;
            state.filter_input = state.filter.clone();
            return KeyAction::None;
        }
        KeyCode::Backspace => {
            state.filter_input.pop();
            state.filter = state.filter_input.clone();
            state.apply_filter();
        }
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        KeyCode::Char(c) => {
            state.filter_input.push(c);
            state.filter = state.filter_input.clone();
            state.apply_filter();
        }
        _ => {}
    }
    KeyAction::None
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if is_ctrl_c(&key) {
        return KeyAction::Quit;
    }
    let table = &mut state.table;
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => state.popup = PopupState::QuitConfirm,
        KeyCode::Char('?') => state.popup = PopupState::Help { scroll: 0 },

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => table.focus_previous(),
        KeyCode::Down | KeyCode::Char('j') => table.focus_next(),
        KeyCode::PageUp => table.focus_previous_page(),
        KeyCode::PageDown => table.focus_next_page(),
        KeyCode::Home | KeyCode::Char('g') => table.focus_first(),
        KeyCode::End | KeyCode::Char('G') => table.focus_last(),

        // Row actions
        KeyCode::Char(' ') => table.toggle_selection(),
        KeyCode::Enter => table.open_focused(),
        KeyCode::Char('m') => table.context_menu_focused(),
        KeyCode::Char('f') => {
            if let Some(marker) = table.focused_row().map(|r| r.marker.clone()) {
                state.apply_quick_fix(&marker, 0);
            }
        }

        // Filtering
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Filter;
            state.filter_input = state.filter.clone();
        }
        KeyCode::Esc if !state.filter.is_empty() => {
            state.filter.clear();
            state.filter_input.clear();
            state.apply_filter();
        }
        KeyCode::Char('e') => state.toggle_severity(MarkerSeverity::Error),
        KeyCode::Char('w') => state.toggle_severity(MarkerSeverity::Warning),
        KeyCode::Char('i') => state.toggle_severity(MarkerSeverity::Info),

        KeyCode::Char('h') => {
            let hide = table.is_visible();
            table.toggle_visibility(hide);
            if !hide {
                table.dom_focus();
            }
        }
        KeyCode::Char('r') => return KeyAction::Reload,
        _ => {}
    }
    KeyAction::None
}

/// Handles pointer input over the table body.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.popup.is_open() || !state.table.is_visible() {
        return;
    }
    let body = state.table_body;
    let inside = mouse.column >= body.x
        && mouse.column < body.x + body.width
        && mouse.row >= body.y
        && mouse.row < body.y + body.height;
    let window_row = mouse.row.saturating_sub(body.y) as usize;
    if matches!(mouse.kind, MouseEventKind::Moved) {
        state.pointer_column = inside.then(|| mouse.column - body.x);
    }

    match mouse.kind {
        MouseEventKind::Moved if inside => state.table.mouse_over(window_row, now),
        MouseEventKind::Moved => state.table.mouse_out(now),
        MouseEventKind::Down(MouseButton::Left) if inside => state.table.focus_at(window_row),
        MouseEventKind::Down(MouseButton::Right) if inside => {
            state.table.focus_at(window_row);
            state.table.context_menu_focused();
        }
        MouseEventKind::ScrollDown => state.table.focus_next(),
        MouseEventKind::ScrollUp => state.table.focus_previous(),
        _ => {}
    }
    state.process_table_events();
}
