//! Filter options for the problems table.

use tracing::debug;

use super::glob::{ResourceGlobMatcher, split_glob_aware};
use super::matching::{MatchSpan, WordMatcher, matches_fuzzy};
use crate::model::MarkerSeverity;

/// Free-text part of the filter.
#[derive(Debug, Clone, Default)]
pub struct TextFilter {
    pub text: String,
    pub negate: bool,
    words: Option<WordMatcher>,
}

impl TextFilter {
    /// Blank text means "no text filter".
    pub fn new(text: &str, negate: bool) -> Self {
        let text = text.trim().to_string();
        let words = WordMatcher::new(&text);
        Self {
            text,
            negate,
            words,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.text.is_empty()
    }

    /// Match for identifier-like fields (source, code).
    pub fn match_fuzzy(&self, target: &str) -> Option<Vec<MatchSpan>> {
        if !self.is_active() {
            return None;
        }
        matches_fuzzy(&self.text, target)
    }

    /// Match for prose fields (message, file label, owner).
    pub fn match_words(&self, target: &str) -> Option<Vec<MatchSpan>> {
        self.words.as_ref()?.matches(target)
    }
}

/// Everything that decides which markers are visible.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    pub show_errors: bool,
    pub show_warnings: bool,
    pub show_infos: bool,
    pub includes_matcher: ResourceGlobMatcher,
    pub excludes_matcher: ResourceGlobMatcher,
    pub text_filter: TextFilter,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            show_errors: true,
            show_warnings: true,
            show_infos: true,
            includes_matcher: ResourceGlobMatcher::default(),
            excludes_matcher: ResourceGlobMatcher::default(),
            text_filter: TextFilter::default(),
        }
    }
}

impl FilterOptions {
    /// Builds options from the filter box query.
    ///
    /// A leading `!` negates the text filter. The query is also read as a
    /// comma separated list of resource terms: `!term` excludes matching
    /// resources, any other term includes them regardless of severity and
    /// text. `files_exclude` globs are always excluded.
    pub fn new(
        filter: &str,
        files_exclude: &[String],
        show_errors: bool,
        show_warnings: bool,
        show_infos: bool,
    ) -> Self {
        let negate = filter.starts_with('!');
        let text = filter.trim_start_matches('!');
        let text_filter = TextFilter::new(text, negate);

        let mut excludes: Vec<String> = files_exclude.to_vec();
        let mut includes: Vec<String> = Vec::new();
        for term in split_glob_aware(filter, ',')
            .into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            match term.strip_prefix('!') {
                Some(excluded) => {
                    let excluded = excluded.trim_start_matches('!').trim();
                    if !excluded.is_empty() {
                        push_term_globs(&mut excludes, excluded);
                    }
                }
                None => push_term_globs(&mut includes, term),
            }
        }

        debug!(
            text = %text_filter.text,
            negate,
            includes = includes.len(),
            excludes = excludes.len(),
            "built filter options"
        );

        Self {
            show_errors,
            show_warnings,
            show_infos,
            includes_matcher: ResourceGlobMatcher::new(&includes),
            excludes_matcher: ResourceGlobMatcher::new(&excludes),
            text_filter,
        }
    }

    pub fn shows(&self, severity: MarkerSeverity) -> bool {
        match severity {
            MarkerSeverity::Error => self.show_errors,
            MarkerSeverity::Warning => self.show_warnings,
            MarkerSeverity::Info => self.show_infos,
        }
    }
}

/// A term `t` covers resources named `t` and everything below a folder `t`.
fn push_term_globs(globs: &mut Vec<String>, term: &str) {
    let term = if term.starts_with('.') {
        format!("*{}", term)
    } else {
        term.to_string()
    };
    globs.push(format!("**/{}", term));
    globs.push(format!("**/{}/**", term));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(filter: &str) -> FilterOptions {
        FilterOptions::new(filter, &[], true, true, true)
    }

    #[test]
    fn default_shows_everything_without_text() {
        let o = FilterOptions::default();
        assert!(MarkerSeverity::all().iter().all(|s| o.shows(*s)));
        assert!(!o.text_filter.is_active());
        assert!(o.includes_matcher.is_empty());
        assert!(o.excludes_matcher.is_empty());
    }

    #[test]
    fn blank_query_is_no_text_filter() {
        let o = opts("   ");
        assert!(!o.text_filter.is_active());
        assert!(o.includes_matcher.is_empty());
    }

    #[test]
    fn negated_query_strips_bang() {
        let o = opts("!foo");
        assert!(o.text_filter.negate);
        assert_eq!(o.text_filter.text, "foo");
        assert!(o.excludes_matcher.matches_path("src/foo"));
        assert!(o.includes_matcher.is_empty());
    }

    #[test]
    fn terms_become_include_and_exclude_globs() {
        let o = opts("main.rs, !target, .toml");
        assert!(o.includes_matcher.matches_path("/ws/src/main.rs"));
        assert!(o.includes_matcher.matches_path("/ws/Cargo.toml"));
        assert!(o.excludes_matcher.matches_path("/ws/target/debug/x.rs"));
        assert!(!o.excludes_matcher.matches_path("/ws/src/main.rs"));
    }

    #[test]
    fn files_exclude_always_applies() {
        let o = FilterOptions::new("", &["**/vendor/**".to_string()], true, false, true);
        assert!(o.excludes_matcher.matches_path("/ws/vendor/lib.rs"));
        assert!(!o.shows(MarkerSeverity::Warning));
    }

    #[test]
    fn text_filter_matchers() {
        let t = TextFilter::new("unused", false);
        assert_eq!(
            t.match_words("Unused variable"),
            Some(vec![MatchSpan::new(0, 6)])
        );
        assert!(t.match_fuzzy("clippy").is_none());
        assert!(TextFilter::default().match_words("anything").is_none());
    }
}
