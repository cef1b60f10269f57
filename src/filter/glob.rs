//! Resource glob matching.
//!
//! Globs are translated to anchored regexes once, when the filter changes.
//! Supported syntax: `**`, `*`, `?`, `{a,b}` alternatives and `[...]` classes
//! (`[!...]` negates).

use regex::Regex;
use tracing::warn;

use crate::model::Resource;

#[derive(Debug, Clone)]
struct CompiledGlob {
    pattern: String,
    regex: Regex,
}

/// Matches resources against a set of glob patterns.
///
/// An empty matcher matches nothing. Patterns that fail to compile are logged
/// and skipped, so matching itself never fails.
#[derive(Debug, Clone, Default)]
pub struct ResourceGlobMatcher {
    globs: Vec<CompiledGlob>,
}

impl ResourceGlobMatcher {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut globs = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() || globs.iter().any(|g: &CompiledGlob| g.pattern == pattern) {
                continue;
            }
            match Regex::new(&glob_to_regex(pattern)) {
                Ok(regex) => globs.push(CompiledGlob {
                    pattern: pattern.to_string(),
                    regex,
                }),
                Err(e) => warn!(pattern, error = %e, "ignoring invalid glob"),
            }
        }
        Self { globs }
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    pub fn matches_path(&self, path: &str) -> bool {
        self.globs.iter().any(|g| g.regex.is_match(path))
    }

    /// Tests the resource's absolute path and, when known, its
    /// workspace-relative path.
    pub fn matches(&self, resource: &Resource, relative_path: Option<&str>) -> bool {
        if self.globs.is_empty() {
            return false;
        }
        self.matches_path(resource.path()) || relative_path.is_some_and(|p| self.matches_path(p))
    }
}

/// Translates a glob into an anchored regex pattern.
pub(crate) fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::from("^");
    let mut brace_depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' if chars.get(i + 1) == Some(&'*') => {
                let at_segment_start = i == 0 || chars[i - 1] == '/';
                let followed_by_slash = chars.get(i + 2) == Some(&'/');
                if at_segment_start && followed_by_slash {
                    // `**/` matches zero or more leading directories
                    out.push_str("(?:.*/)?");
                    i += 3;
                    continue;
                }
                if i + 2 == chars.len() && i > 0 && chars[i - 1] == '/' {
                    // trailing `/**`: the `/` was already emitted
                    out.pop();
                    out.push_str("(?:/.*)?");
                } else {
                    out.push_str(".*");
                }
                i += 2;
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '{' => {
                brace_depth += 1;
                out.push_str("(?:");
            }
            '}' if brace_depth > 0 => {
                brace_depth -= 1;
                out.push(')');
            }
            ',' if brace_depth > 0 => out.push('|'),
            '[' => {
                if let Some(close) = chars[i + 1..].iter().position(|&ch| ch == ']') {
                    let class: String = chars[i + 1..i + 1 + close].iter().collect();
                    out.push('[');
                    match class.strip_prefix('!') {
                        Some(negated) => {
                            out.push('^');
                            out.push_str(&escape_class(negated));
                        }
                        None => out.push_str(&escape_class(&class)),
                    }
                    out.push(']');
                    i += close + 2;
                    continue;
                }
                out.push_str(r"\[");
            }
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        i += 1;
    }

    // Unbalanced braces produce an invalid regex, which the caller reports.
    out.push('$');
    out
}

fn escape_class(class: &str) -> String {
    class
        .chars()
        .map(|c| match c {
            '\\' | '[' | ']' | '^' | '&' | '~' => format!("\\{}", c),
            _ => c.to_string(),
        })
        .collect()
}

/// Splits `text` on `separator`, ignoring separators inside `{}` or `[]`.
pub fn split_glob_aware(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut braces = 0usize;
    let mut brackets = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '{' => braces += 1,
            '}' => braces = braces.saturating_sub(1),
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            c if c == separator && braces == 0 && brackets == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
