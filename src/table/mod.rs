//! Virtualized problems table.
//!
//! [`MarkerTable`] owns the marker groups, the current filter and the
//! projected rows, and tracks focus, selection, the scroll window and pointer
//! hover. Hosts drive it with the [`MarkersView`] operations and navigation
//! calls, render [`MarkerTable::render_window`] and drain [`TableEvent`]s.

pub mod columns;
mod hover;
mod projection;
mod row;

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;

use tracing::{debug, trace, warn};

pub use columns::{
    COLUMN_SPACING, ColumnDef, ColumnKind, WidthPolicy, allocate_widths, default_columns,
};
pub use hover::{HOVER_DEBOUNCE, HoverTarget, HoverTracker};
pub use projection::filter_markers;
pub use row::MarkerRow;

use crate::filter::FilterOptions;
use crate::label::LabelFormatter;
use crate::model::{Marker, MarkerSeverity, Resource, ResourceMarkers};
use crate::quickfix::{MarkersViewModel, QuickFixProvider};
use crate::view::{Cell, CellRenderer, RenderContext, RendererRegistry};

/// Notifications for the host, in the order they happened.
#[derive(Debug, Clone)]
pub enum TableEvent {
    ContextMenu(MarkerRow),
    Open(MarkerRow),
    FocusChange(Vec<MarkerRow>),
    SelectionChange(Vec<MarkerRow>),
}

/// Operations a markers view offers to its host.
pub trait MarkersView {
    /// Replaces the dataset and re-projects the rows.
    fn reset(&mut self, groups: Vec<ResourceMarkers>);

    /// Stores new filter options, then resets with `groups`.
    fn filter(&mut self, groups: Vec<ResourceMarkers>, options: FilterOptions);

    /// Replaces the given groups (by resource) and re-projects.
    fn update(&mut self, groups: Vec<ResourceMarkers>);

    fn layout(&mut self, height: u16, width: u16);

    fn dom_focus(&mut self);

    fn selection(&self) -> Vec<MarkerRow>;

    fn focus(&self) -> Vec<MarkerRow>;

    fn set_aria_label(&mut self, label: &str);

    fn toggle_visibility(&mut self, hide: bool);

    fn visible_item_count(&self) -> usize;

    fn is_visible(&self) -> bool;

    // The flat table has no tree nodes and mirrors no external selection.
    fn collapse_markers(&mut self) {
        trace!("collapse_markers ignored");
    }

    fn reveal_markers(&mut self, _resource: Option<&Resource>, _focus: bool) {
        trace!("reveal_markers ignored");
    }

    fn set_marker_selection(&mut self, _marker: Option<&Marker>) {
        trace!("set_marker_selection ignored");
    }

    fn update_marker(&mut self, _marker: &Marker) {
        trace!("update_marker ignored");
    }
}

struct TableColumn {
    def: ColumnDef,
    renderer: Box<dyn CellRenderer>,
}

/// A row of the scroll window, ready to draw.
#[derive(Debug, Clone)]
pub struct RenderedRow {
    /// Index in the full row set.
    pub index: usize,
    pub severity: MarkerSeverity,
    pub focused: bool,
    pub selected: bool,
    pub hovered: bool,
    pub cells: Vec<Cell>,
}

pub struct MarkerTable {
    columns: Vec<TableColumn>,
    widths: Vec<u16>,
    groups: Vec<ResourceMarkers>,
    group_index: HashMap<Resource, usize>,
    options: FilterOptions,
    labels: Box<dyn LabelFormatter>,
    rows: Vec<MarkerRow>,
    focused: Option<usize>,
    tracked_focus: Option<String>,
    selected: HashSet<String>,
    scroll_offset: usize,
    height: u16,
    width: u16,
    has_focus: bool,
    visible: bool,
    aria_label: String,
    hover: HoverTracker,
    events: VecDeque<TableEvent>,
}

impl std::fmt::Debug for MarkerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerTable")
            .field("groups", &self.groups.len())
            .field("rows", &self.rows.len())
            .field("focused", &self.focused)
            .field("selected", &self.selected.len())
            .field("scroll_offset", &self.scroll_offset)
            .field("visible", &self.visible)
            .finish()
    }
}

impl MarkerTable {
    /// Builds a table with the default columns, resolving each column's
    /// renderer from `renderers` once. Columns without a renderer are dropped.
    pub fn new(labels: Box<dyn LabelFormatter>, mut renderers: RendererRegistry) -> Self {
        let columns = default_columns()
            .into_iter()
            .filter_map(|def| match renderers.take(def.template_id) {
                Some(renderer) => Some(TableColumn { def, renderer }),
                None => {
                    warn!(template = def.template_id, "no renderer registered, column dropped");
                    None
                }
            })
            .collect();

        Self {
            columns,
            widths: Vec::new(),
            groups: Vec::new(),
            group_index: HashMap::new(),
            options: FilterOptions::default(),
            labels,
            rows: Vec::new(),
            focused: None,
            tracked_focus: None,
            selected: HashSet::new(),
            scroll_offset: 0,
            height: 0,
            width: 0,
            has_focus: false,
            visible: true,
            aria_label: String::new(),
            hover: HoverTracker::default(),
            events: VecDeque::new(),
        }
    }

    pub fn with_labels(labels: impl LabelFormatter + 'static) -> Self {
        Self::new(Box::new(labels), RendererRegistry::default())
    }

    // ===== Accessors =====

    pub fn rows(&self) -> &[MarkerRow] {
        &self.rows
    }

    pub fn groups(&self) -> &[ResourceMarkers] {
        &self.groups
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn labels(&self) -> &dyn LabelFormatter {
        self.labels.as_ref()
    }

    pub fn column_defs(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().map(|c| &c.def)
    }

    pub fn column_widths(&self) -> &[u16] {
        &self.widths
    }

    /// Column under horizontal offset `x` of the laid out row, `None` in the
    /// gaps and past the last column.
    pub fn column_at(&self, x: u16) -> Option<usize> {
        let mut start = 0u16;
        for (index, &width) in self.widths.iter().enumerate() {
            let end = start.saturating_add(width);
            if x < start {
                return None;
            }
            if x < end {
                return Some(index);
            }
            start = end.saturating_add(COLUMN_SPACING);
        }
        None
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_row(&self) -> Option<&MarkerRow> {
        self.focused.and_then(|i| self.rows.get(i))
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn aria_label(&self) -> &str {
        &self.aria_label
    }

    pub fn has_dom_focus(&self) -> bool {
        self.has_focus
    }

    /// Total number of markers across all groups, before filtering.
    pub fn total_marker_count(&self) -> usize {
        self.groups.iter().map(ResourceMarkers::len).sum()
    }

    pub fn hovered_index(&self) -> Option<usize> {
        match self.hover.settled() {
            HoverTarget::Row(index) => Some(index),
            HoverTarget::None => None,
        }
    }

    /// Takes all pending events.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        self.events.drain(..).collect()
    }

    // ===== Dataset =====

    fn rebuild_index(&mut self) {
        self.group_index = self
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.resource.clone(), i))
            .collect();
    }

    fn refresh(&mut self) {
        let previous_focus = self.focused_row().map(|r| r.id().to_string());
        let previous_selection = self.selected.len();

        self.rows = filter_markers(&self.groups, &self.options, self.labels.as_ref());
        self.hover.clear();

        let ids: HashSet<&str> = self.rows.iter().map(MarkerRow::id).collect();
        self.selected.retain(|id| ids.contains(id.as_str()));

        self.resolve_focus();
        self.clamp_scroll();

        debug!(
            groups = self.groups.len(),
            rows = self.rows.len(),
            "markers table reset"
        );

        let focus_now = self.focused_row().map(|r| r.id().to_string());
        if focus_now != previous_focus {
            self.emit_focus_change();
        }
        if self.selected.len() != previous_selection {
            self.emit_selection_change();
        }
    }

    /// Re-finds the focused marker by id, clamping to the old position when it
    /// disappeared.
    fn resolve_focus(&mut self) {
        if self.rows.is_empty() {
            self.focused = None;
            self.tracked_focus = None;
            return;
        }
        let Some(previous) = self.focused else {
            return;
        };
        let tracked = self
            .tracked_focus
            .as_ref()
            .and_then(|id| self.rows.iter().position(|r| r.id() == id));
        if let Some(idx) = tracked {
            self.focused = Some(idx);
            return;
        }
        let idx = previous.min(self.rows.len() - 1);
        self.focused = Some(idx);
        self.tracked_focus = Some(self.rows[idx].id().to_string());
    }

    fn viewport(&self) -> usize {
        (self.height as usize).max(1)
    }

    fn clamp_scroll(&mut self) {
        let max_offset = self.rows.len().saturating_sub(self.viewport());
        self.scroll_offset = self.scroll_offset.min(max_offset);
        if let Some(focused) = self.focused {
            if focused < self.scroll_offset {
                self.scroll_offset = focused;
            } else if focused >= self.scroll_offset + self.viewport() {
                self.scroll_offset = focused + 1 - self.viewport();
            }
        }
    }

    // ===== Focus and selection =====

    fn emit_focus_change(&mut self) {
        let rows = self.focus();
        self.events.push_back(TableEvent::FocusChange(rows));
    }

    fn emit_selection_change(&mut self) {
        let rows = self.selection();
        self.events.push_back(TableEvent::SelectionChange(rows));
    }

    fn set_focus(&mut self, index: usize) {
        if self.rows.is_empty() {
            return;
        }
        let index = index.min(self.rows.len() - 1);
        if self.focused == Some(index) {
            return;
        }
        self.focused = Some(index);
        self.tracked_focus = Some(self.rows[index].id().to_string());
        self.clamp_scroll();
        self.emit_focus_change();
    }

    pub fn focus_next(&mut self) {
        let next = self.focused.map_or(0, |i| i.saturating_add(1));
        self.set_focus(next);
    }

    pub fn focus_previous(&mut self) {
        let prev = self.focused.map_or(0, |i| i.saturating_sub(1));
        self.set_focus(prev);
    }

    pub fn focus_next_page(&mut self) {
        let next = self.focused.unwrap_or(0).saturating_add(self.viewport());
        self.set_focus(next);
    }

    pub fn focus_previous_page(&mut self) {
        let prev = self.focused.unwrap_or(0).saturating_sub(self.viewport());
        self.set_focus(prev);
    }

    pub fn focus_first(&mut self) {
        self.set_focus(0);
    }

    pub fn focus_last(&mut self) {
        self.set_focus(usize::MAX);
    }

    /// Focuses the row under window line `window_row`.
    pub fn focus_at(&mut self, window_row: usize) {
        if let Some(index) = self.row_at(window_row) {
            self.set_focus(index);
        }
    }

    /// Row index shown at window line `window_row`.
    pub fn row_at(&self, window_row: usize) -> Option<usize> {
        let index = self.scroll_offset + window_row;
        (window_row < self.viewport() && index < self.rows.len()).then_some(index)
    }

    /// Adds the focused row to the selection, or removes it.
    pub fn toggle_selection(&mut self) {
        let Some(id) = self.focused_row().map(|r| r.id().to_string()) else {
            return;
        };
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.emit_selection_change();
    }

    /// Replaces the selection with the given marker ids. Unknown ids are ignored.
    pub fn set_selection<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        let visible: HashSet<&str> = self.rows.iter().map(MarkerRow::id).collect();
        self.selected = ids
            .into_iter()
            .filter(|id| visible.contains(id))
            .map(str::to_string)
            .collect();
        self.emit_selection_change();
    }

    pub fn is_selected(&self, row: &MarkerRow) -> bool {
        self.selected.contains(row.id())
    }

    pub fn open_focused(&mut self) {
        if let Some(row) = self.focused_row().cloned() {
            debug!(marker = %row.id(), "open marker");
            self.events.push_back(TableEvent::Open(row));
        }
    }

    pub fn context_menu_focused(&mut self) {
        if let Some(row) = self.focused_row().cloned() {
            self.events.push_back(TableEvent::ContextMenu(row));
        }
    }

    // ===== Hover =====

    /// Pointer moved to window line `window_row`; lines past the last row
    /// count as leaving.
    pub fn mouse_over(&mut self, window_row: usize, now: Instant) {
        match self.row_at(window_row) {
            Some(index) => self.hover.hover(index, now),
            None => self.hover.leave(now),
        }
    }

    pub fn mouse_out(&mut self, now: Instant) {
        self.hover.leave(now);
    }

    /// Advances the hover clock; a settled row is reported to `view_model`.
    /// Returns `true` when a notification was delivered.
    pub fn tick(&mut self, now: Instant, view_model: &mut dyn MarkersViewModel) -> bool {
        let Some(index) = self.hover.poll(now) else {
            return false;
        };
        let Some(row) = self.rows.get(index) else {
            return false;
        };
        trace!(marker = %row.id(), "hover settled");
        view_model.on_marker_mouse_hover(&row.marker);
        true
    }

    // ===== Rendering =====

    /// Rows of the scroll window with their cells rendered.
    pub fn render_window(&self, quick_fixes: &dyn QuickFixProvider) -> Vec<RenderedRow> {
        let ctx = RenderContext {
            labels: self.labels.as_ref(),
            quick_fixes,
        };
        let hovered = self.hovered_index();
        let end = (self.scroll_offset + self.viewport()).min(self.rows.len());

        self.rows[self.scroll_offset.min(end)..end]
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let index = self.scroll_offset + i;
                RenderedRow {
                    index,
                    severity: row.severity(),
                    focused: self.focused == Some(index),
                    selected: self.is_selected(row),
                    hovered: hovered == Some(index),
                    cells: self
                        .columns
                        .iter()
                        .map(|c| c.renderer.render(row, &ctx))
                        .collect(),
                }
            })
            .collect()
    }

    /// Visible rows per severity.
    pub fn severity_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for row in &self.rows {
            counts[row.severity().rank() as usize] += 1;
        }
        counts
    }
}

impl MarkersView for MarkerTable {
    fn reset(&mut self, groups: Vec<ResourceMarkers>) {
        self.groups = groups;
        self.rebuild_index();
        self.refresh();
    }

    fn filter(&mut self, groups: Vec<ResourceMarkers>, options: FilterOptions) {
        self.options = options;
        self.reset(groups);
    }

    fn update(&mut self, groups: Vec<ResourceMarkers>) {
        for group in groups {
            match self.group_index.get(&group.resource) {
                Some(&i) => self.groups[i] = group,
                None => {
                    self.group_index
                        .insert(group.resource.clone(), self.groups.len());
                    self.groups.push(group);
                }
            }
        }
        self.refresh();
    }

    fn layout(&mut self, height: u16, width: u16) {
        self.height = height;
        self.width = width;
        let defs: Vec<ColumnDef> = self.columns.iter().map(|c| c.def.clone()).collect();
        self.widths = allocate_widths(&defs, width);
        self.clamp_scroll();
    }

    fn dom_focus(&mut self) {
        self.has_focus = true;
        if self.focused.is_none() {
            self.set_focus(0);
        }
    }

    fn selection(&self) -> Vec<MarkerRow> {
        self.rows
            .iter()
            .filter(|r| self.selected.contains(r.id()))
            .cloned()
            .collect()
    }

    fn focus(&self) -> Vec<MarkerRow> {
        self.focused_row().cloned().into_iter().collect()
    }

    fn set_aria_label(&mut self, label: &str) {
        self.aria_label = label.to_string();
    }

    fn toggle_visibility(&mut self, hide: bool) {
        self.visible = !hide;
        if hide {
            self.has_focus = false;
            self.hover.clear();
        }
    }

    fn visible_item_count(&self) -> usize {
        self.rows.len()
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::label::WorkspaceLabels;
    use crate::model::Marker;
    use crate::quickfix::NoQuickFixes;

    fn marker(id: &str, file: &str, severity: MarkerSeverity, message: &str) -> Marker {
        Marker::new(id, Resource::new(file), severity, message).with_owner("rustc")
    }

    fn group(file: &str, markers: &[(&str, MarkerSeverity, &str)]) -> ResourceMarkers {
        ResourceMarkers::new(
            Resource::new(file),
            markers
                .iter()
                .map(|(id, sev, msg)| marker(id, file, *sev, msg))
                .collect(),
        )
    }

    fn dataset() -> Vec<ResourceMarkers> {
        vec![
            group(
                "file:///ws/a.rs",
                &[
                    ("a1", MarkerSeverity::Warning, "unused var"),
                    ("a2", MarkerSeverity::Error, "missing semicolon"),
                ],
            ),
            group(
                "file:///ws/b.rs",
                &[("b1", MarkerSeverity::Info, "consider renaming")],
            ),
        ]
    }

    fn table() -> MarkerTable {
        let mut t = MarkerTable::with_labels(WorkspaceLabels::new(Some(PathBuf::from("/ws"))));
        t.layout(10, 100);
        t
    }

    fn ids(rows: &[MarkerRow]) -> Vec<&str> {
        rows.iter().map(MarkerRow::id).collect()
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl MarkersViewModel for Recorder {
        fn on_marker_mouse_hover(&mut self, marker: &Marker) {
            self.0.push(marker.id.clone());
        }
    }

    #[test]
    fn reset_projects_sorted_rows() {
        let mut t = table();
        t.reset(dataset());
        assert_eq!(ids(t.rows()), vec!["a2", "a1", "b1"]);
        assert_eq!(t.visible_item_count(), 3);
        assert_eq!(t.total_marker_count(), 3);
        assert_eq!(t.severity_counts(), [1, 1, 1]);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut t = table();
        t.reset(dataset());
        let first: Vec<String> = t.rows().iter().map(|r| r.id().to_string()).collect();
        t.reset(dataset());
        assert_eq!(ids(t.rows()), first);
    }

    #[test]
    fn empty_dataset_has_no_rows() {
        let mut t = table();
        t.reset(Vec::new());
        assert_eq!(t.visible_item_count(), 0);
        t.focus_next();
        t.toggle_selection();
        t.open_focused();
        assert!(t.focus().is_empty());
        assert!(t.selection().is_empty());
        assert!(t.render_window(&NoQuickFixes).is_empty());
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn filter_stores_options_and_resets() {
        let mut t = table();
        let options = FilterOptions::new("", &[], true, false, false);
        t.filter(dataset(), options);
        assert_eq!(ids(t.rows()), vec!["a2"]);
        assert!(!t.options().show_warnings);
    }

    #[test]
    fn update_replaces_group_and_keeps_others() {
        let mut t = table();
        t.reset(dataset());
        t.update(vec![group(
            "file:///ws/a.rs",
            &[("a3", MarkerSeverity::Warning, "dead code")],
        )]);
        assert_eq!(ids(t.rows()), vec!["a3", "b1"]);
        assert_eq!(t.groups().len(), 2);
    }

    #[test]
    fn update_appends_unknown_groups() {
        let mut t = table();
        t.reset(dataset());
        t.update(vec![group(
            "file:///ws/c.rs",
            &[("c1", MarkerSeverity::Error, "type mismatch")],
        )]);
        assert_eq!(ids(t.rows()), vec!["a2", "c1", "a1", "b1"]);

        // A second update of the same group replaces, never duplicates.
        t.update(vec![group("file:///ws/c.rs", &[])]);
        assert_eq!(ids(t.rows()), vec!["a2", "a1", "b1"]);
        assert_eq!(t.groups().len(), 3);
    }

    #[test]
    fn focus_follows_marker_across_reset() {
        let mut t = table();
        t.reset(dataset());
        t.focus_next();
        t.focus_next();
        assert_eq!(t.focused_row().map(MarkerRow::id), Some("a1"));

        // An error in b.rs now sorts ahead of a1.
        t.update(vec![group(
            "file:///ws/b.rs",
            &[("b2", MarkerSeverity::Error, "borrow of moved value")],
        )]);
        assert_eq!(t.focused_row().map(MarkerRow::id), Some("a1"));
        assert_eq!(t.focused_index(), Some(2));
    }

    #[test]
    fn focus_clamps_when_marker_disappears() {
        let mut t = table();
        t.reset(dataset());
        t.focus_last();
        assert_eq!(t.focused_row().map(MarkerRow::id), Some("b1"));
        t.drain_events();

        t.update(vec![group("file:///ws/b.rs", &[])]);
        assert_eq!(t.focused_row().map(MarkerRow::id), Some("a1"));
        assert!(matches!(
            t.drain_events().as_slice(),
            [TableEvent::FocusChange(rows)] if rows[0].id() == "a1"
        ));
    }

    #[test]
    fn selection_survives_reset_and_drops_removed_markers() {
        let mut t = table();
        t.reset(dataset());
        t.set_selection(["a1", "b1", "zz"]);
        assert_eq!(ids(&t.selection()), vec!["a1", "b1"]);

        t.reset(dataset());
        assert_eq!(ids(&t.selection()), vec!["a1", "b1"]);

        t.update(vec![group("file:///ws/b.rs", &[])]);
        assert_eq!(ids(&t.selection()), vec!["a1"]);
    }

    #[test]
    fn toggle_selection_emits_change() {
        let mut t = table();
        t.reset(dataset());
        t.focus_first();
        t.toggle_selection();
        t.toggle_selection();
        let events = t.drain_events();
        assert!(matches!(events[0], TableEvent::FocusChange(_)));
        assert!(matches!(&events[1], TableEvent::SelectionChange(rows) if rows.len() == 1));
        assert!(matches!(&events[2], TableEvent::SelectionChange(rows) if rows.is_empty()));
    }

    #[test]
    fn open_and_context_menu_carry_focused_row() {
        let mut t = table();
        t.reset(dataset());
        t.dom_focus();
        assert!(t.has_dom_focus());
        t.open_focused();
        t.context_menu_focused();
        let events = t.drain_events();
        assert!(matches!(&events[1], TableEvent::Open(row) if row.id() == "a2"));
        assert!(matches!(&events[2], TableEvent::ContextMenu(row) if row.id() == "a2"));
    }

    #[test]
    fn window_follows_focus() {
        let mut t = table();
        let markers: Vec<(String, MarkerSeverity, &str)> = (0..50)
            .map(|i| (format!("m{i}"), MarkerSeverity::Warning, "lint"))
            .collect();
        let refs: Vec<(&str, MarkerSeverity, &str)> =
            markers.iter().map(|(id, s, m)| (id.as_str(), *s, *m)).collect();
        t.reset(vec![group("file:///ws/big.rs", &refs)]);
        t.layout(5, 100);

        t.focus_next_page();
        t.focus_next();
        assert_eq!(t.focused_index(), Some(6));
        assert_eq!(t.scroll_offset(), 2);

        let window = t.render_window(&NoQuickFixes);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].index, 2);
        assert!(window[4].focused);

        t.focus_last();
        assert_eq!(t.scroll_offset(), 45);
        assert_eq!(t.row_at(4), Some(49));
        assert_eq!(t.row_at(5), None);

        t.focus_previous_page();
        t.focus_first();
        assert_eq!(t.scroll_offset(), 0);
    }

    #[test]
    fn layout_allocates_all_columns() {
        let mut t = table();
        t.layout(10, 120);
        let widths = t.column_widths();
        assert_eq!(widths.len(), 4);
        assert_eq!(widths.iter().sum::<u16>() + 3, 120);
    }

    #[test]
    fn render_window_has_a_cell_per_column() {
        let mut t = table();
        t.reset(dataset());
        let window = t.render_window(&NoQuickFixes);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].cells.len(), 4);
        assert_eq!(window[0].cells[2].text(), "a.rs [Ln 1, Col 1]");
        assert_eq!(window[0].severity, MarkerSeverity::Error);
    }

    #[test]
    fn hover_notifies_once_after_debounce() {
        let mut t = table();
        t.reset(dataset());
        let mut vm = Recorder::default();
        let t0 = Instant::now();

        t.mouse_over(0, t0);
        t.mouse_over(1, t0 + Duration::from_millis(100));
        assert!(!t.tick(t0 + Duration::from_millis(400), &mut vm));
        assert!(t.tick(t0 + Duration::from_millis(600), &mut vm));
        assert!(!t.tick(t0 + Duration::from_millis(2000), &mut vm));
        assert_eq!(vm.0, vec!["a1"]);
        assert_eq!(t.hovered_index(), Some(1));

        // Leave, then come back to the same row.
        t.mouse_out(t0 + Duration::from_millis(2000));
        assert!(!t.tick(t0 + Duration::from_millis(2600), &mut vm));
        t.mouse_over(1, t0 + Duration::from_millis(3000));
        assert!(t.tick(t0 + Duration::from_millis(3500), &mut vm));
        assert_eq!(vm.0, vec!["a1", "a1"]);
    }

    #[test]
    fn hover_returning_to_settled_row_notifies_again() {
        let mut t = table();
        t.reset(dataset());
        let mut vm = Recorder::default();
        let t0 = Instant::now();

        t.mouse_over(1, t0);
        assert!(t.tick(t0 + Duration::from_millis(500), &mut vm));
        t.mouse_over(2, t0 + Duration::from_millis(510));
        t.mouse_over(1, t0 + Duration::from_millis(520));
        assert!(t.tick(t0 + Duration::from_millis(1100), &mut vm));
        assert_eq!(vm.0, vec!["a1", "a1"]);
        assert_eq!(t.hovered_index(), Some(1));
    }

    #[test]
    fn column_at_skips_spacing() {
        let t = table();
        let widths = t.column_widths().to_vec();
        assert_eq!(t.column_at(0), Some(0));
        assert_eq!(t.column_at(widths[0] - 1), Some(0));
        assert_eq!(t.column_at(widths[0]), None);
        assert_eq!(t.column_at(widths[0] + COLUMN_SPACING), Some(1));
        let total: u16 = widths.iter().sum::<u16>() + COLUMN_SPACING * (widths.len() as u16 - 1);
        assert_eq!(t.column_at(total), None);
    }

    #[test]
    fn hover_below_last_row_counts_as_leave() {
        let mut t = table();
        t.reset(dataset());
        let mut vm = Recorder::default();
        let t0 = Instant::now();
        t.mouse_over(7, t0);
        assert!(!t.tick(t0 + Duration::from_secs(1), &mut vm));
        assert!(vm.0.is_empty());
    }

    #[test]
    fn hiding_clears_hover_and_focus_flag() {
        let mut t = table();
        t.reset(dataset());
        t.dom_focus();
        t.toggle_visibility(true);
        assert!(!t.is_visible());
        assert!(!t.has_dom_focus());
        t.toggle_visibility(false);
        assert!(t.is_visible());
    }

    #[test]
    fn stubs_do_nothing() {
        let mut t = table();
        t.reset(dataset());
        let before = ids(t.rows()).join(",");
        t.collapse_markers();
        t.reveal_markers(None, true);
        t.set_marker_selection(None);
        let m = marker("a1", "file:///ws/a.rs", MarkerSeverity::Error, "changed");
        t.update_marker(&m);
        t.set_aria_label("Problems");
        assert_eq!(ids(t.rows()).join(","), before);
        assert_eq!(t.aria_label(), "Problems");
    }
}
