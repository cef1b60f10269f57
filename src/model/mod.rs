//! Marker data model.
//!
//! Markers are produced elsewhere (language servers, linters, build tools) and
//! arrive grouped per resource. The table only reads them: every value here is
//! immutable once built, and rows share markers through `Arc`.

mod group;
mod marker;
mod resource;

pub use group::ResourceMarkers;
pub use marker::{Marker, MarkerCode, MarkerSeverity, RelatedInformation};
pub use resource::{Resource, WALKTHROUGH_SCHEME, WALKTHROUGH_SNIPPET_SCHEME};
