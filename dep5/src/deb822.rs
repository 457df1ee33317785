//! Minimal deb822 paragraph reader and writer.
//!
//! A deb822 document is a sequence of paragraphs ("stanzas"): blocks of
//! `Key: value` lines separated by blank lines, where a line starting with
//! a space or tab continues the previous field's value and a line starting
//! with `#` is a comment. Keys are case-insensitive; field order within a
//! stanza is significant and preserved.
//!
//! This module deliberately implements only what the copyright format
//! needs — no folding beyond the continuation convention, no signatures,
//! no charset detection. Callers hand it text and get [`RawStanza`] values
//! back, in order.

use std::fmt;

use crate::error::FormatError;

/// One raw paragraph: an ordered mapping from case-insensitive keys to
/// unparsed string values.
///
/// Continuation lines are stored inside the value as `'\n'` followed by the
/// line with its single leading space preserved — the wire form that
/// [`crate::multiline`] operates on. A value whose first logical line is
/// empty therefore starts with `'\n'`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStanza {
    fields: Vec<(String, String)>,
}

impl RawStanza {
    /// Creates an empty stanza.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a field value, matching the key case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// Sets a field value.
    ///
    /// An existing field (matched case-insensitively) keeps its position
    /// and original key spelling; a new field is appended.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .fields
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
        {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    /// Removes a field, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self
            .fields
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(key))?;
        Some(self.fields.remove(index).1)
    }

    /// Returns true iff the field is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates fields in insertion order, with their original key
    /// spelling.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true iff the stanza has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for RawStanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            let (first, rest) = match value.split_once('\n') {
                Some((first, rest)) => (first, Some(rest)),
                None => (value, None),
            };
            write!(f, "{}:", key)?;
            if !first.is_empty() {
                write!(f, " {}", first)?;
            }
            if let Some(rest) = rest {
                write!(f, "\n{}", rest)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterates the paragraphs of a deb822 document lazily, in order.
///
/// Yields `Err` once for a malformed line and then stops; exhaustion of
/// the input is the ordinary end of the iterator, never an error.
pub fn iter_stanzas(text: &str) -> Stanzas<'_> {
    Stanzas {
        lines: text.lines(),
        done: false,
    }
}

/// Lazy paragraph iterator returned by [`iter_stanzas`].
#[derive(Debug, Clone)]
pub struct Stanzas<'a> {
    lines: std::str::Lines<'a>,
    done: bool,
}

impl Iterator for Stanzas<'_> {
    type Item = Result<RawStanza, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut stanza = RawStanza::new();
        let mut current_key: Option<String> = None;

        for line in self.lines.by_ref() {
            if line.trim().is_empty() {
                if !stanza.is_empty() {
                    return Some(Ok(stanza));
                }
                // Leading blank lines before a paragraph are ignored.
                continue;
            }
            if line.starts_with('#') {
                continue;
            }
            if line.starts_with(' ') || line.starts_with('\t') {
                let Some(key) = &current_key else {
                    self.done = true;
                    return Some(Err(FormatError::MalformedLine(line.to_string())));
                };
                // A continuation extends the current value; the line keeps
                // its leading whitespace.
                let mut value = stanza.remove(key).unwrap_or_default();
                value.push('\n');
                value.push_str(line);
                stanza.set(key, value);
                continue;
            }
            let parsed = line.split_once(':').and_then(|(key, rest)| {
                let key = key.trim_end();
                if key.is_empty() || key.chars().any(char::is_whitespace) {
                    None
                } else {
                    Some((key, rest.trim_start()))
                }
            });
            match parsed {
                Some((key, value)) => {
                    stanza.set(key, value);
                    current_key = Some(key.to_string());
                }
                None => {
                    self.done = true;
                    return Some(Err(FormatError::MalformedLine(line.to_string())));
                }
            }
        }

        self.done = true;
        if stanza.is_empty() {
            None
        } else {
            Some(Ok(stanza))
        }
    }
}
