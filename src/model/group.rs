//! Markers bundled per resource.

use std::sync::Arc;

use super::{Marker, Resource};

/// A resource plus the markers reported for it.
///
/// The resource is the group's identity: `update` replaces groups by it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceMarkers {
    pub resource: Resource,
    pub markers: Vec<Arc<Marker>>,
}

impl ResourceMarkers {
    pub fn new(resource: Resource, markers: Vec<Marker>) -> Self {
        Self {
            resource,
            markers: markers.into_iter().map(Arc::new).collect(),
        }
    }

    /// An empty group; used to clear a resource through `update`.
    pub fn empty(resource: Resource) -> Self {
        Self {
            resource,
            markers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
