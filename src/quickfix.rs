//! Quick-fix availability per marker.
//!
//! Fixes are known up front (from the markers file) but only become "enabled"
//! once resolved for a marker, which happens when the user settles the pointer
//! on its row or focuses it. The severity column reads the flag at render time.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::model::Marker;

/// Read side used by the severity/quick-fix column.
pub trait QuickFixProvider {
    fn quick_fix_enabled(&self, marker: &Marker) -> bool;

    fn quick_fixes(&self, marker: &Marker) -> &[String];
}

/// Receives hover notifications from the table.
pub trait MarkersViewModel {
    fn on_marker_mouse_hover(&mut self, marker: &Marker);
}

type EnablementListener = Box<dyn FnMut(&str, bool)>;

/// Quick fixes keyed by marker id, with enablement change notifications.
#[derive(Default)]
pub struct QuickFixRegistry {
    available: HashMap<String, Vec<String>>,
    enabled: HashSet<String>,
    listeners: Vec<EnablementListener>,
}

impl std::fmt::Debug for QuickFixRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuickFixRegistry")
            .field("available", &self.available.len())
            .field("enabled", &self.enabled.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl QuickFixRegistry {
    pub fn new(available: HashMap<String, Vec<String>>) -> Self {
        Self {
            available,
            ..Self::default()
        }
    }

    /// Called with `(marker_id, enabled)` whenever a marker's flag flips.
    pub fn subscribe(&mut self, listener: impl FnMut(&str, bool) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces the known fixes; markers that lost all fixes are disabled.
    pub fn set_available(&mut self, available: HashMap<String, Vec<String>>) {
        self.available = available;
        let stale: Vec<String> = self
            .enabled
            .iter()
            .filter(|id| self.available.get(*id).is_none_or(|f| f.is_empty()))
            .cloned()
            .collect();
        for id in stale {
            self.enabled.remove(&id);
            self.notify(&id, false);
        }
    }

    /// Resolves fixes for `marker`. Returns `true` if the flag changed.
    pub fn resolve(&mut self, marker: &Marker) -> bool {
        let has_fixes = self
            .available
            .get(&marker.id)
            .is_some_and(|f| !f.is_empty());
        if !has_fixes || self.enabled.contains(&marker.id) {
            return false;
        }
        debug!(marker = %marker.id, "quick fixes resolved");
        self.enabled.insert(marker.id.clone());
        self.notify(&marker.id, true);
        true
    }

    /// Applies the first fix of an enabled marker and returns its title.
    ///
    /// Fixes are not executed against files; the application is recorded.
    pub fn apply_first(&self, marker: &Marker) -> Option<&str> {
        self.apply(marker, 0)
    }

    pub fn apply(&self, marker: &Marker, index: usize) -> Option<&str> {
        if !self.quick_fix_enabled(marker) {
            return None;
        }
        let title = self.quick_fixes(marker).get(index)?;
        info!(marker = %marker.id, fix = %title, "quick fix applied");
        Some(title.as_str())
    }

    fn notify(&mut self, id: &str, enabled: bool) {
        for listener in &mut self.listeners {
            listener(id, enabled);
        }
    }
}

impl QuickFixProvider for QuickFixRegistry {
    fn quick_fix_enabled(&self, marker: &Marker) -> bool {
        self.enabled.contains(&marker.id)
    }

    fn quick_fixes(&self, marker: &Marker) -> &[String] {
        self.available
            .get(&marker.id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl MarkersViewModel for QuickFixRegistry {
    fn on_marker_mouse_hover(&mut self, marker: &Marker) {
        self.resolve(marker);
    }
}

/// Provider with no fixes at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoQuickFixes;

impl QuickFixProvider for NoQuickFixes {
    fn quick_fix_enabled(&self, _marker: &Marker) -> bool {
        false
    }

    fn quick_fixes(&self, _marker: &Marker) -> &[String] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::model::{MarkerSeverity, Resource};

    fn marker(id: &str) -> Marker {
        Marker::new(id, Resource::new("file:///a.rs"), MarkerSeverity::Warning, "m")
    }

    fn registry() -> QuickFixRegistry {
        let mut available = HashMap::new();
        available.insert("m1".to_string(), vec!["Remove unused import".to_string()]);
        available.insert("m2".to_string(), Vec::new());
        QuickFixRegistry::new(available)
    }

    #[test]
    fn hover_enables_known_fixes_once() {
        let mut reg = registry();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        reg.subscribe(move |id, enabled| sink.borrow_mut().push((id.to_string(), enabled)));

        let m1 = marker("m1");
        assert!(!reg.quick_fix_enabled(&m1));
        reg.on_marker_mouse_hover(&m1);
        reg.on_marker_mouse_hover(&m1);
        assert!(reg.quick_fix_enabled(&m1));
        assert_eq!(*seen.borrow(), vec![("m1".to_string(), true)]);
    }

    #[test]
    fn markers_without_fixes_stay_disabled() {
        let mut reg = registry();
        assert!(!reg.resolve(&marker("m2")));
        assert!(!reg.resolve(&marker("unknown")));
        assert!(reg.apply_first(&marker("m2")).is_none());
    }

    #[test]
    fn apply_requires_enabled() {
        let mut reg = registry();
        let m1 = marker("m1");
        assert!(reg.apply_first(&m1).is_none());
        reg.resolve(&m1);
        assert_eq!(reg.apply_first(&m1), Some("Remove unused import"));
        assert_eq!(reg.apply(&m1, 3), None);
    }

    #[test]
    fn set_available_disables_stale() {
        let mut reg = registry();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        reg.subscribe(move |id, enabled| sink.borrow_mut().push((id.to_string(), enabled)));

        let m1 = marker("m1");
        reg.resolve(&m1);
        reg.set_available(HashMap::new());
        assert!(!reg.quick_fix_enabled(&m1));
        assert_eq!(seen.borrow().last(), Some(&("m1".to_string(), false)));
    }
}
