//! dep5 - Machine-readable `debian/copyright` files
//!
//! This library parses, validates, edits and serializes copyright files in
//! the DEP5 "structured copyright" format: an ordered sequence of
//! RFC822-like paragraphs with format-specific rules layered on top.
//!
//! The specification for the format is available here:
//! <https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/>
//!
//! # Examples
//!
//! ```
//! use dep5::Copyright;
//!
//! let text = "\
//! Format: http://www.debian.org/doc/packaging-manuals/copyright-format/1.0/
//! Upstream-Name: X Solitaire
//!
//! Files: *
//! Copyright: Copyright 1998 John Doe <jdoe@example.com>
//! License: GPL-2+
//! ";
//!
//! let (doc, warnings) = Copyright::parse(text).unwrap();
//! assert!(warnings.is_empty());
//! assert_eq!(doc.header().upstream_name().unwrap().as_deref(), Some("X Solitaire"));
//!
//! let governing = doc.find_files_paragraph("src/main.c").unwrap().unwrap();
//! assert_eq!(governing.license().unwrap().synopsis(), "GPL-2+");
//! ```

pub mod copyright;
pub mod deb822;
pub mod error;
pub mod fields;
pub mod glob;
pub mod license;
pub mod multiline;
pub mod paragraph;

pub use copyright::Copyright;
pub use deb822::RawStanza;
pub use error::{Error, FormatError, RestrictedFieldError, ValidationError};
pub use fields::{Codec, FieldValue};
pub use license::License;
pub use paragraph::{
    FilesParagraph, FormatWarning, Header, LicenseParagraph, Paragraph, CURRENT_FORMAT,
    KNOWN_FORMATS,
};
