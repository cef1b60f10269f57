//! Problems filter: severity toggles, resource globs and free text.

pub mod glob;
pub mod matching;
mod options;

pub use glob::ResourceGlobMatcher;
pub use matching::MatchSpan;
pub use options::{FilterOptions, TextFilter};
