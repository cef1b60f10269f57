//! UI-agnostic view model: cells produced by the column renderers.

mod cell;
pub mod renderers;

pub use cell::{Cell, Segment, SegmentStyle};
pub use renderers::{CellRenderer, RenderContext, RendererRegistry};
