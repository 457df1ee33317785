//! Glob pattern compiler for `Files` fields.
//!
//! DEP5 file patterns are shell-style globs with three special forms:
//! `*` matches any sequence of characters (including `/`, so `*.in` matches
//! at any depth), `?` matches exactly one character, and `\\` escapes a
//! literal backslash. No other escape sequence is legal.
//!
//! A pattern set compiles to a single anchored [`Regex`] alternation, so a
//! candidate path matches only if one pattern covers the *entire* path.
//! Patterns are never substring searches, and the compiler knows nothing
//! about filesystem state; it only ever sees strings.

use regex::Regex;

use crate::error::FormatError;

/// A compiled set of glob patterns, usable as a single match predicate.
///
/// Produced by [`compile`]; used by
/// [`FilesParagraph::matches`](crate::paragraph::FilesParagraph::matches).
#[derive(Debug, Clone)]
pub struct GlobSet {
    regex: Regex,
}

impl GlobSet {
    /// Returns true iff one of the compiled patterns matches the whole of
    /// `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Compiles an ordered sequence of glob patterns into one [`GlobSet`].
///
/// An empty pattern list compiles to a matcher that matches only the empty
/// string, i.e. no real path.
///
/// # Errors
///
/// Returns [`FormatError::InvalidEscape`] for a backslash followed by
/// anything other than another backslash, and
/// [`FormatError::TrailingBackslash`] for a lone backslash at the end of a
/// pattern.
///
/// # Examples
///
/// ```
/// use dep5::glob::compile;
///
/// let set = compile(&["debian/*", "*.Debian"]).unwrap();
/// assert!(set.is_match("debian/rules"));
/// assert!(set.is_match("foo/bar/README.Debian"));
/// assert!(!set.is_match("other/debian/rules"));
/// ```
pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet, FormatError> {
    let mut alternatives = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        alternatives.push(translate(pattern.as_ref())?);
    }

    // `(?s)` so `*` and `?` cross every character, newlines included, and
    // `\A`/`\z` anchor the whole alternation: a pattern must cover the
    // entire candidate path.
    let source = if alternatives.is_empty() {
        r"(?s)\A\z".to_string()
    } else {
        format!(r"(?s)\A(?:{})\z", alternatives.join("|"))
    };

    let regex = Regex::new(&source).expect("translated glob is always a valid regex");
    Ok(GlobSet { regex })
}

/// Translates one glob pattern into an (unanchored) regex fragment.
fn translate(pattern: &str) -> Result<String, FormatError> {
    let mut out = String::new();
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                flush_literal(&mut out, &mut literal);
                out.push_str(".*");
            }
            '?' => {
                flush_literal(&mut out, &mut literal);
                out.push('.');
            }
            '\\' => match chars.next() {
                Some('\\') => literal.push('\\'),
                Some(other) => return Err(FormatError::InvalidEscape(other)),
                None => return Err(FormatError::TrailingBackslash),
            },
            other => literal.push(other),
        }
    }
    flush_literal(&mut out, &mut literal);
    Ok(out)
}

fn flush_literal(out: &mut String, literal: &mut String) {
    if !literal.is_empty() {
        out.push_str(&regex::escape(literal));
        literal.clear();
    }
}
