//! Multiline field codec for the deb822 wire format.
//!
//! Field values spanning several lines are stored on the wire with a
//! continuation convention: the first logical line follows the key on the
//! same line, every subsequent line is prefixed with a single space, and a
//! blank (or all-whitespace) logical line is written as the two-character
//! sequence `" ."`.
//!
//! [`format_multiline`] converts logical text to wire form and
//! [`parse_multiline`] converts it back. The transformation looks lossy but
//! is exactly invertible on well-formed wire text: `format(parse(w)) == w`
//! whenever every continuation line of `w` begins with a single space, and
//! `parse(format(s)) == s` for any logical text whose non-first lines are
//! not whitespace-only and not a lone `"."` (those are canonicalized to an
//! empty line).

use crate::error::FormatError;

/// Formats logical text for insertion in a deb822 field.
///
/// Each line except the first is prefixed with a single space. Lines that
/// are blank or only whitespace are replaced with `" ."`.
///
/// # Examples
///
/// ```
/// use dep5::multiline::format_multiline;
///
/// assert_eq!(format_multiline("Foo"), "Foo");
/// assert_eq!(format_multiline("Foo\nBar baz\n\nQuux."), "Foo\n Bar baz\n .\n Quux.");
/// ```
pub fn format_multiline(text: &str) -> String {
    format_multiline_lines(&text.lines().collect::<Vec<_>>())
}

/// Same as [`format_multiline`], but taking input pre-split into lines.
///
/// The two entry points agree bit-for-bit: `format_multiline(s)` equals
/// `format_multiline_lines(&s.lines().collect::<Vec<_>>())`.
pub fn format_multiline_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if i == 0 {
            out.push_str(line);
            continue;
        }
        out.push('\n');
        if line.trim().is_empty() {
            out.push_str(" .");
        } else {
            out.push(' ');
            out.push_str(line);
        }
    }
    out
}

/// Inverse of [`format_multiline`].
///
/// The first line is returned unchanged. Each subsequent line must begin
/// with exactly one space (anything else is a [`FormatError`]); after that
/// space is removed, a line equal to `"."` becomes an empty line and any
/// other content passes through unchanged.
///
/// # Errors
///
/// Returns [`FormatError::BadContinuation`] if a continuation line does not
/// start with a space.
pub fn parse_multiline(wire: &str) -> Result<String, FormatError> {
    Ok(parse_multiline_as_lines(wire)?.join("\n"))
}

/// Same as [`parse_multiline`], but returning the logical lines.
///
/// (This is the inverse of [`format_multiline_lines`].)
pub fn parse_multiline_as_lines(wire: &str) -> Result<Vec<String>, FormatError> {
    let mut out = Vec::new();
    for (i, line) in wire.lines().enumerate() {
        if i == 0 {
            out.push(line.to_string());
            continue;
        }
        let rest = line
            .strip_prefix(' ')
            .ok_or(FormatError::BadContinuation)?;
        if rest == "." {
            out.push(String::new());
        } else {
            out.push(rest.to_string());
        }
    }
    Ok(out)
}
