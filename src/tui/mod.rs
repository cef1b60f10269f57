//! Terminal user interface for browsing markers.
//!
//! A single problems table with a header, filter input and popups, driven by
//! keyboard and mouse.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, InputMode, MenuItem, PopupState, ViewConfig};
