//! Error types for DEP5 parsing, validation and field access.
//!
//! Three distinct failure families exist so callers can tell them apart by
//! type rather than by message text:
//!
//! - [`FormatError`]: the wire syntax itself is malformed (bad continuation
//!   line, bad glob escape, unparseable paragraph line). These always fail
//!   the operation that detected them.
//! - [`ValidationError`]: a value being written (or a stanza being wrapped)
//!   violates a field constraint. The document stays in its last valid
//!   state; a failed `set` commits nothing.
//! - [`RestrictedFieldError`]: an attempt to read or write a key outside a
//!   paragraph kind's declared field set.
//!
//! Advisory conditions (unknown or superseded `Format` values) are not
//! errors; see [`FormatWarning`](crate::paragraph::FormatWarning).
//!
//! Display strings are stable and suitable for exact-match testing.

use thiserror::Error;

/// Errors caused by malformed wire syntax.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A continuation line of a multiline field value did not start with
    /// exactly one space.
    #[error("continued line must begin with a single space")]
    BadContinuation,

    /// A glob pattern escaped a character that may not be escaped.
    /// Only `\\` (a literal backslash) is a valid escape sequence.
    #[error("invalid escape sequence: \\{0}")]
    InvalidEscape(char),

    /// A glob pattern ended with a lone, unescaped backslash.
    #[error("single backslash not allowed at end of pattern")]
    TrailingBackslash,

    /// A line inside a paragraph was not a `Key: value` line, a
    /// continuation line, or a comment.
    #[error("malformed paragraph line: {0:?}")]
    MalformedLine(String),

    /// A body paragraph carried neither a `Files` nor a `License` key, so
    /// it cannot be classified.
    #[error("paragraph is neither a Files nor a License paragraph")]
    UnclassifiableParagraph,
}

/// Errors caused by values that violate a field constraint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A single-line value contained an embedded newline.
    #[error("must be single line")]
    NotSingleLine,

    /// A list element was empty or all-whitespace.
    #[error("values must not be empty")]
    EmptyValue,

    /// A line-list element contained an embedded newline.
    #[error("values must not contain newlines")]
    EmbeddedNewline,

    /// A space-separated token contained internal whitespace.
    #[error("values must not contain whitespace")]
    EmbeddedWhitespace,

    /// A required field was given no value (or a value that encodes to
    /// absent, such as an empty list).
    #[error("value must not be None")]
    ValueRequired,

    /// A paragraph was constructed over a stanza missing a required key.
    #[error("{0:?} field required")]
    MissingRequiredField(&'static str),

    /// A License-only paragraph was constructed over a stanza that also
    /// carries a `Files` key.
    #[error("input appears to be a Files paragraph")]
    LooksLikeFilesParagraph,

    /// A typed value of the wrong shape was handed to a field codec
    /// (e.g. a token list for a single-line field).
    #[error("value has the wrong shape for this field")]
    WrongValueShape,
}

/// An attempt to access a key outside a paragraph kind's declared set.
///
/// Kept as its own type, not a [`ValidationError`] variant: restricted-field
/// violations are how paragraph-kind mutual exclusivity is enforced, and
/// callers need to distinguish them from ordinary value validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("field {0:?} is not in this paragraph's declared field set")]
pub struct RestrictedFieldError(pub String);

/// Top-level error for this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed wire syntax.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A value violated a field constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Access to an undeclared field.
    #[error(transparent)]
    RestrictedField(#[from] RestrictedFieldError),

    /// The input has no `Format` field in its first paragraph and is
    /// therefore not a machine-readable copyright file.
    #[error("input is not a machine-readable debian/copyright file")]
    NotMachineReadable,
}
