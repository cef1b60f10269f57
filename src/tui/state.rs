//! Application state management.

use std::sync::Arc;

use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use tracing::debug;

use crate::filter::FilterOptions;
use crate::model::{Marker, MarkerSeverity, ResourceMarkers};
use crate::quickfix::{QuickFixProvider, QuickFixRegistry};
use crate::table::{MarkerTable, MarkersView, TableEvent};

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    /// No popup is open.
    #[default]
    None,
    /// Help popup with scroll offset.
    Help { scroll: usize },
    /// Marker detail popup.
    Detail { marker: Arc<Marker>, scroll: usize },
    /// Actions for one marker.
    ContextMenu { marker: Arc<Marker>, selected: usize },
    /// Quit confirmation dialog.
    QuitConfirm,
}

impl PopupState {
    /// Returns true if any popup is open (excluding None).
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Entry of the context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    QuickFix { index: usize, title: String },
    ShowDetails,
    ToggleSelection,
}

impl MenuItem {
    pub fn label(&self) -> String {
        match self {
            MenuItem::QuickFix { title, .. } => format!("⚡ {}", title),
            MenuItem::ShowDetails => "Show Details".to_string(),
            MenuItem::ToggleSelection => "Toggle Selection".to_string(),
        }
    }
}

/// Filter settings given on the command line.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub filter: String,
    pub files_exclude: Vec<String>,
    pub show_errors: bool,
    pub show_warnings: bool,
    pub show_infos: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            filter: String::new(),
            files_exclude: Vec::new(),
            show_errors: true,
            show_warnings: true,
            show_infos: true,
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    pub table: MarkerTable,
    pub quick_fixes: QuickFixRegistry,
    pub input_mode: InputMode,
    pub popup: PopupState,

    /// Applied filter query.
    pub filter: String,
    /// Text being edited in filter mode.
    pub filter_input: String,
    pub files_exclude: Vec<String>,
    pub show_errors: bool,
    pub show_warnings: bool,
    pub show_infos: bool,

    /// One-shot message shown in the header until the next key.
    pub status_message: Option<String>,
    /// Name of the data source.
    pub source_name: String,
    pub loaded_at: Option<DateTime<Local>>,
    /// Table body area from the last frame, for mouse hit testing.
    pub table_body: Rect,
    /// Pointer offset from the left edge of the table body.
    pub pointer_column: Option<u16>,
}

impl AppState {
    pub fn new(table: MarkerTable, quick_fixes: QuickFixRegistry, config: ViewConfig) -> Self {
        Self {
            table,
            quick_fixes,
            input_mode: InputMode::Normal,
            popup: PopupState::None,
            filter_input: config.filter.clone(),
            filter: config.filter,
            files_exclude: config.files_exclude,
            show_errors: config.show_errors,
            show_warnings: config.show_warnings,
            show_infos: config.show_infos,
            status_message: None,
            source_name: String::new(),
            loaded_at: None,
            table_body: Rect::default(),
            pointer_column: None,
        }
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::new(
            &self.filter,
            &self.files_exclude,
            self.show_errors,
            self.show_warnings,
            self.show_infos,
        )
    }

    /// Replaces the whole dataset.
    pub fn load(&mut self, groups: Vec<ResourceMarkers>) {
        let options = self.filter_options();
        self.table.filter(groups, options);
        self.after_reset();
    }

    /// Replaces changed groups.
    pub fn update(&mut self, groups: Vec<ResourceMarkers>) {
        self.table.update(groups);
        self.after_reset();
    }

    /// Re-runs the filter over the current groups.
    pub fn apply_filter(&mut self) {
        let groups = self.table.groups().to_vec();
        self.load(groups);
        debug!(filter = %self.filter, rows = self.table.visible_item_count(), "filter applied");
    }

    pub fn toggle_severity(&mut self, severity: MarkerSeverity) {
        let flag = match severity {
            MarkerSeverity::Error => &mut self.show_errors,
            MarkerSeverity::Warning => &mut self.show_warnings,
            MarkerSeverity::Info => &mut self.show_infos,
        };
        *flag = !*flag;
        self.apply_filter();
    }

    pub fn shows(&self, severity: MarkerSeverity) -> bool {
        match severity {
            MarkerSeverity::Error => self.show_errors,
            MarkerSeverity::Warning => self.show_warnings,
            MarkerSeverity::Info => self.show_infos,
        }
    }

    fn after_reset(&mut self) {
        let label = format!(
            "Problems: {} of {}",
            self.table.visible_item_count(),
            self.table.total_marker_count()
        );
        self.table.set_aria_label(&label);
        self.process_table_events();
    }

    /// Reacts to table notifications.
    pub fn process_table_events(&mut self) {
        for event in self.table.drain_events() {
            match event {
                TableEvent::FocusChange(rows) => {
                    if let Some(row) = rows.first() {
                        self.quick_fixes.resolve(&row.marker);
                    }
                }
                TableEvent::SelectionChange(rows) => {
                    if !rows.is_empty() {
                        self.status_message = Some(format!("{} selected", rows.len()));
                    }
                }
                TableEvent::Open(row) => {
                    self.popup = PopupState::Detail {
                        marker: row.marker,
                        scroll: 0,
                    };
                }
                TableEvent::ContextMenu(row) => {
                    self.quick_fixes.resolve(&row.marker);
                    self.popup = PopupState::ContextMenu {
                        marker: row.marker,
                        selected: 0,
                    };
                }
            }
        }
    }

    /// Actions offered for `marker`: its enabled quick fixes first.
    pub fn context_menu_items(&self, marker: &Marker) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = if self.quick_fixes.quick_fix_enabled(marker) {
            self.quick_fixes
                .quick_fixes(marker)
                .iter()
                .enumerate()
                .map(|(index, title)| MenuItem::QuickFix {
                    index,
                    title: title.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };
        items.push(MenuItem::ShowDetails);
        items.push(MenuItem::ToggleSelection);
        items
    }

    /// Applies quick fix `index` of `marker` and reports it in the status.
    pub fn apply_quick_fix(&mut self, marker: &Marker, index: usize) {
        self.quick_fixes.resolve(marker);
        self.status_message = match self.quick_fixes.apply(marker, index) {
            Some(title) => Some(format!("Applied: {}", title)),
            None => Some("No quick fixes available".to_string()),
        };
    }
}
