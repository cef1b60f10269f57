//! TUI widgets for markview.

mod context_menu;
mod detail;
mod header;
mod help;
mod markers;
mod popup;
mod quit_confirm;

pub use context_menu::render_context_menu;
pub use detail::render_detail;
pub use header::render_header;
pub use help::render_help;
pub use markers::render_markers;
pub use quit_confirm::render_quit_confirm;
