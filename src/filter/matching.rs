//! Text matching for the problems filter box.
//!
//! All spans are half-open **character** ranges (not byte ranges) so renderers
//! can split display strings without re-encoding.

use regex::{Regex, RegexBuilder};

/// A matched range `[start, end)` in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn folded(text: &str) -> Vec<char> {
    text.chars().map(fold).collect()
}

/// Fuzzy match used for short identifiers (source, code).
///
/// Tries, in order: case-insensitive prefix, contiguous substring, then an
/// in-order subsequence. Returns `None` when nothing matched.
pub fn matches_fuzzy(word: &str, target: &str) -> Option<Vec<MatchSpan>> {
    let word = folded(word);
    if word.is_empty() || target.is_empty() {
        return None;
    }
    let target = folded(target);
    if word.len() > target.len() {
        return None;
    }

    if target.starts_with(&word) {
        return Some(vec![MatchSpan::new(0, word.len())]);
    }

    if let Some(pos) = target.windows(word.len()).position(|w| w == word.as_slice()) {
        return Some(vec![MatchSpan::new(pos, pos + word.len())]);
    }

    let mut spans: Vec<MatchSpan> = Vec::new();
    let mut wanted = word.iter().peekable();
    for (i, c) in target.iter().enumerate() {
        let Some(&&w) = wanted.peek() else {
            break;
        };
        if *c != w {
            continue;
        }
        wanted.next();
        match spans.last_mut() {
            Some(last) if last.end == i => last.end = i + 1,
            _ => spans.push(MatchSpan::new(i, i + 1)),
        }
    }

    if wanted.peek().is_some() {
        None
    } else {
        Some(spans)
    }
}

/// Case-insensitive contiguous matcher used for prose (message, file, owner).
///
/// `*` in the filter text matches any run of characters. Compiled once per
/// filter so per-marker matching does not rebuild the regex.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    regex: Regex,
}

impl WordMatcher {
    /// Returns `None` for an empty (or all-wildcard) word.
    pub fn new(word: &str) -> Option<Self> {
        let parts: Vec<String> = word
            .split('*')
            .filter(|p| !p.is_empty())
            .map(regex::escape)
            .collect();
        if parts.is_empty() {
            return None;
        }
        // Escaped literals always compile.
        let regex = RegexBuilder::new(&parts.join(".*?"))
            .case_insensitive(true)
            .build()
            .ok()?;
        Some(Self { regex })
    }

    pub fn matches(&self, target: &str) -> Option<Vec<MatchSpan>> {
        let mut spans = Vec::new();
        let mut chars_before = 0;
        let mut last_byte = 0;
        for m in self.regex.find_iter(target) {
            if m.start() == m.end() {
                continue;
            }
            chars_before += target[last_byte..m.start()].chars().count();
            let len = m.as_str().chars().count();
            spans.push(MatchSpan::new(chars_before, chars_before + len));
            chars_before += len;
            last_byte = m.end();
        }
        (!spans.is_empty()).then_some(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzzy_prefers_prefix() {
        assert_eq!(
            matches_fuzzy("rust", "rustc"),
            Some(vec![MatchSpan::new(0, 4)])
        );
    }

    #[test]
    fn fuzzy_contiguous_is_case_insensitive() {
        assert_eq!(
            matches_fuzzy("LINT", "clippy-lints"),
            Some(vec![MatchSpan::new(7, 11)])
        );
    }

    #[test]
    fn fuzzy_subsequence_merges_adjacent_chars() {
        assert_eq!(
            matches_fuzzy("e38", "E0308"),
            Some(vec![
                MatchSpan::new(0, 1),
                MatchSpan::new(2, 3),
                MatchSpan::new(4, 5)
            ])
        );
        assert_eq!(
            matches_fuzzy("ts", "ts-server"),
            Some(vec![MatchSpan::new(0, 2)])
        );
    }

    #[test]
    fn fuzzy_rejects_missing_chars() {
        assert_eq!(matches_fuzzy("xyz", "eslint"), None);
        assert_eq!(matches_fuzzy("", "eslint"), None);
        assert_eq!(matches_fuzzy("longer-than-target", "ts"), None);
    }

    #[test]
    fn word_matcher_finds_all_occurrences_in_chars() {
        let m = WordMatcher::new("foo").unwrap();
        assert_eq!(
            m.matches("ü foo and FOO"),
            Some(vec![MatchSpan::new(2, 5), MatchSpan::new(10, 13)])
        );
        assert_eq!(m.matches("bar"), None);
    }

    #[test]
    fn word_matcher_wildcard_and_literals() {
        let m = WordMatcher::new("unused*var").unwrap();
        assert_eq!(
            m.matches("unused variable `x`"),
            Some(vec![MatchSpan::new(0, 10)])
        );

        let dots = WordMatcher::new("a.b").unwrap();
        assert!(dots.matches("axb").is_none());
        assert!(dots.matches("a.b").is_some());

        assert!(WordMatcher::new("").is_none());
        assert!(WordMatcher::new("**").is_none());
    }
}
