//! The `License` field value.

use crate::error::{FormatError, ValidationError};
use crate::multiline::{format_multiline_lines, parse_multiline_as_lines};

/// The contents of a `License` field. Immutable, compared structurally.
///
/// The synopsis is the first line of the field: the short license name, or
/// an expression giving alternatives (e.g. `GPL-2+`). The text is the full
/// license text, if any, held in logical form — no continuation-line space
/// prefixes, no `.` placeholders for blank lines.
///
/// A `License` is replaced, never mutated in place; to change a paragraph's
/// license, build a new value and assign it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    synopsis: String,
    text: String,
}

impl License {
    /// Creates a new `License`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotSingleLine`] if the synopsis contains
    /// an embedded newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use dep5::License;
    ///
    /// let license = License::new("GPL-2+", "").unwrap();
    /// assert_eq!(license.synopsis(), "GPL-2+");
    /// assert_eq!(license.text(), "");
    ///
    /// assert!(License::new("foo\nbar", "").is_err());
    /// ```
    pub fn new(
        synopsis: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let synopsis = synopsis.into();
        if synopsis.contains('\n') {
            return Err(ValidationError::NotSingleLine);
        }
        Ok(Self {
            synopsis,
            text: text.into(),
        })
    }

    /// Decodes a `License` from deb822 wire form.
    ///
    /// The first logical line becomes the synopsis, the remaining logical
    /// lines become the text. Empty wire text yields an empty synopsis and
    /// no text.
    pub fn from_wire(wire: &str) -> Result<Self, FormatError> {
        let lines = parse_multiline_as_lines(wire)?;
        let (synopsis, text) = match lines.split_first() {
            None => (String::new(), String::new()),
            Some((first, rest)) => (first.clone(), rest.join("\n")),
        };
        Ok(Self { synopsis, text })
    }

    /// Encodes this `License` into deb822 wire form.
    pub fn to_wire(&self) -> String {
        let mut lines: Vec<&str> = vec![&self.synopsis];
        lines.extend(self.text.lines());
        format_multiline_lines(&lines)
    }

    /// The short license name or expression (the field's first line).
    pub fn synopsis(&self) -> &str {
        &self.synopsis
    }

    /// The full license text in logical form. Empty if the field carried
    /// only a synopsis.
    pub fn text(&self) -> &str {
        &self.text
    }
}
