//! The copyright document: one header followed by body paragraphs.

use std::fmt;

use tracing::debug;

use crate::deb822::iter_stanzas;
use crate::error::Error;
use crate::paragraph::{FilesParagraph, FormatWarning, Header, LicenseParagraph, Paragraph};

/// A machine-readable `debian/copyright` document.
///
/// Holds exactly one [`Header`] followed by zero or more body paragraphs
/// in source order. Order is significant: when several `Files` paragraphs
/// match the same path, the last one listed governs it.
///
/// The document owns its paragraphs exclusively; mutation is not
/// internally synchronized, so concurrent writers must serialize access
/// themselves. Read-only operations may run concurrently on an otherwise
/// unmutated document.
#[derive(Debug, Clone, Default)]
pub struct Copyright {
    header: Header,
    paragraphs: Vec<Paragraph>,
}

impl Copyright {
    /// Creates a blank document: a freshly synthesized header with the
    /// current format and no body paragraphs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from text.
    ///
    /// The first stanza becomes the header; each subsequent stanza is
    /// classified as a `Files` or license paragraph by its key shape.
    /// Input with no stanzas at all yields a blank document.
    ///
    /// Advisory diagnostics (superseded or unknown `Format` values) are
    /// returned alongside the document; they never fail the parse.
    ///
    /// # Errors
    ///
    /// [`Error::NotMachineReadable`] if the first stanza has no `Format`
    /// field, plus any wire-format or classification error from the body.
    pub fn parse(text: &str) -> Result<(Self, Vec<FormatWarning>), Error> {
        let mut stanzas = iter_stanzas(text);
        let mut warnings = Vec::new();

        let header = match stanzas.next() {
            Some(first) => {
                let (header, warning) = Header::from_stanza(first?)?;
                warnings.extend(warning);
                header
            }
            None => Header::new(),
        };

        let mut paragraphs = Vec::new();
        for stanza in stanzas {
            paragraphs.push(Paragraph::from_stanza(stanza?)?);
        }

        debug!(
            paragraphs = paragraphs.len(),
            warnings = warnings.len(),
            "parsed copyright document"
        );
        Ok((Self { header, paragraphs }, warnings))
    }

    /// The header paragraph.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The header paragraph, mutably.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Replaces the header wholesale. Only a [`Header`] is accepted; the
    /// previous header is dropped.
    pub fn set_header(&mut self, header: Header) {
        self.header = header;
    }

    /// The body paragraphs, in source order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter()
    }

    /// The `Files` paragraphs, in source order.
    pub fn files_paragraphs(&self) -> impl Iterator<Item = &FilesParagraph> {
        self.paragraphs.iter().filter_map(Paragraph::as_files)
    }

    /// The standalone license paragraphs, in source order.
    pub fn license_paragraphs(&self) -> impl Iterator<Item = &LicenseParagraph> {
        self.paragraphs.iter().filter_map(Paragraph::as_license)
    }

    /// Appends a body paragraph.
    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Finds the `Files` paragraph governing `path`.
    ///
    /// DEP5 gives later paragraphs precedence over earlier ones, so of all
    /// paragraphs whose patterns match, the *last* one listed wins.
    ///
    /// # Errors
    ///
    /// Propagates glob compile errors from any paragraph scanned before
    /// the answer is known.
    pub fn find_files_paragraph(&self, path: &str) -> Result<Option<&FilesParagraph>, Error> {
        let mut governing = None;
        for paragraph in self.files_paragraphs() {
            if paragraph.matches(path)? {
                governing = Some(paragraph);
            }
        }
        Ok(governing)
    }
}

impl fmt::Display for Copyright {
    /// Serializes the document: paragraphs in original order, separated by
    /// one blank line, fields in stanza order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header.raw())?;
        for paragraph in &self.paragraphs {
            write!(f, "\n{}", paragraph.raw())?;
        }
        Ok(())
    }
}
