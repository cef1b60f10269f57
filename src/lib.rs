//! markview - filterable problems table for diagnostics.
//!
//! The library holds the UI-independent parts: the marker model, filtering,
//! the table controller and the column renderers. The `tui` feature adds the
//! terminal frontend used by the `markview` binary.

pub mod filter;
pub mod label;
pub mod model;
pub mod provider;
pub mod quickfix;
pub mod table;
#[cfg(feature = "tui")]
pub mod tui;
pub mod view;
