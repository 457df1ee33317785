//! Typed field codecs.
//!
//! Every declared field on a paragraph kind is bound to one [`Codec`],
//! which converts between the raw wire string stored in the stanza and a
//! typed [`FieldValue`]. Dispatch is a plain enum match — one static table
//! per paragraph kind, no trait objects.
//!
//! `encode` is the left inverse of `decode`: decoding a wire string and
//! re-encoding the result reproduces an equivalent value. Decoding is
//! lenient about wire forms the codecs never emit (stray whitespace in
//! lists, for instance); encoding validates strictly and names the exact
//! constraint it rejects.

use crate::error::{Error, ValidationError};
use crate::license::License;
use crate::multiline::{format_multiline, parse_multiline};

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text in logical form (single-line and multiline fields).
    Text(String),
    /// An ordered list of non-empty lines (e.g. `Upstream-Contact`).
    Lines(Vec<String>),
    /// An ordered list of whitespace-free tokens (e.g. `Files`).
    Tokens(Vec<String>),
    /// A license synopsis plus optional text.
    License(License),
}

/// Wire codec for one field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Identity on read; rejects embedded newlines on write.
    SingleLine,
    /// One element per continuation line, order-preserving.
    LineList,
    /// Tokens joined by single spaces.
    SpaceSeparated,
    /// Logical text via the multiline codec.
    Multiline,
    /// First logical line is the synopsis, the rest is the license text.
    License,
}

impl Codec {
    /// Decodes a raw wire value into a typed [`FieldValue`].
    pub fn decode(self, raw: &str) -> Result<FieldValue, Error> {
        match self {
            Codec::SingleLine => Ok(FieldValue::Text(raw.to_string())),
            Codec::LineList => Ok(FieldValue::Lines(
                raw.trim()
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            Codec::SpaceSeparated => Ok(FieldValue::Tokens(
                raw.split_whitespace().map(str::to_string).collect(),
            )),
            Codec::Multiline => Ok(FieldValue::Text(parse_multiline(raw)?)),
            Codec::License => Ok(FieldValue::License(License::from_wire(raw)?)),
        }
    }

    /// Encodes a typed value back into wire form.
    ///
    /// Returns `Ok(None)` when the value encodes to "absent" (an empty
    /// list), which deletes the field on an optional binding.
    ///
    /// # Errors
    ///
    /// [`ValidationError::WrongValueShape`] if the value's variant does not
    /// match the codec; otherwise the specific constraint violated
    /// (embedded newline, empty element, whitespace in a token).
    pub fn encode(self, value: &FieldValue) -> Result<Option<String>, Error> {
        match (self, value) {
            (Codec::SingleLine, FieldValue::Text(text)) => {
                if text.contains('\n') {
                    return Err(ValidationError::NotSingleLine.into());
                }
                Ok(Some(text.clone()))
            }
            (Codec::LineList, FieldValue::Lines(lines)) => encode_line_list(lines),
            (Codec::SpaceSeparated, FieldValue::Tokens(tokens)) => encode_tokens(tokens),
            (Codec::Multiline, FieldValue::Text(text)) => Ok(Some(format_multiline(text))),
            (Codec::License, FieldValue::License(license)) => Ok(Some(license.to_wire())),
            _ => Err(ValidationError::WrongValueShape.into()),
        }
    }
}

/// Encodes a line list: a single element sits on the key's line, more than
/// one element puts every element on its own continuation line after a
/// blank lead.
fn encode_line_list(lines: &[String]) -> Result<Option<String>, Error> {
    let mut cleaned = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            return Err(ValidationError::EmptyValue.into());
        }
        if line.contains('\n') {
            return Err(ValidationError::EmbeddedNewline.into());
        }
        cleaned.push(line);
    }
    match cleaned.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some((*single).to_string())),
        many => {
            let mut out = String::new();
            for line in many {
                out.push_str("\n ");
                out.push_str(line);
            }
            Ok(Some(out))
        }
    }
}

fn encode_tokens(tokens: &[String]) -> Result<Option<String>, Error> {
    if tokens.is_empty() {
        return Ok(None);
    }
    for token in tokens {
        if token.chars().any(char::is_whitespace) {
            return Err(ValidationError::EmbeddedWhitespace.into());
        }
        if token.is_empty() {
            return Err(ValidationError::EmptyValue.into());
        }
    }
    Ok(Some(tokens.join(" ")))
}
