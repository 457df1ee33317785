//! The header paragraph of a copyright file.

use std::fmt;

use tracing::warn;

use crate::deb822::RawStanza;
use crate::error::Error;
use crate::fields::{Codec, FieldValue};
use crate::license::License;
use crate::paragraph::{FieldSpec, RestrictedParagraph};

/// The canonical URI of the current machine-readable copyright format.
pub const CURRENT_FORMAT: &str =
    "http://www.debian.org/doc/packaging-manuals/copyright-format/1.0/";

/// Format URIs this crate recognizes. The `https://` variant is accepted
/// with a warning; only [`CURRENT_FORMAT`] is current.
pub const KNOWN_FORMATS: &[&str] = &[
    CURRENT_FORMAT,
    "https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/",
];

static HEADER_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "Format",
        codec: Codec::SingleLine,
        required: true,
    },
    FieldSpec {
        name: "Upstream-Name",
        codec: Codec::SingleLine,
        required: false,
    },
    FieldSpec {
        name: "Upstream-Contact",
        codec: Codec::LineList,
        required: false,
    },
    FieldSpec {
        name: "Source",
        codec: Codec::Multiline,
        required: false,
    },
    FieldSpec {
        name: "Disclaimer",
        codec: Codec::Multiline,
        required: false,
    },
    FieldSpec {
        name: "Comment",
        codec: Codec::Multiline,
        required: false,
    },
    FieldSpec {
        name: "License",
        codec: Codec::License,
        required: false,
    },
    FieldSpec {
        name: "Copyright",
        codec: Codec::Multiline,
        required: false,
    },
];

/// Advisory diagnostic about a header's `Format` value.
///
/// Warnings never fail construction or parsing; the document stays usable.
/// They are returned to the caller rather than pushed through a global
/// warning stream, and additionally logged via `tracing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatWarning {
    /// The format URI is recognized but superseded by [`CURRENT_FORMAT`]
    /// (the `https://` spelling of the 1.0 format).
    Superseded(String),
    /// The format URI is not recognized at all.
    Unknown(String),
}

impl fmt::Display for FormatWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatWarning::Superseded(uri) => {
                write!(f, "format is not the current format: {:?}", uri)
            }
            FormatWarning::Unknown(uri) => write!(f, "format not known: {:?}", uri),
        }
    }
}

/// The first paragraph of a machine-readable copyright file.
///
/// Construction always validates that a `Format` field is present; without
/// one the input is not machine-readable. Any other `Format` value than
/// [`CURRENT_FORMAT`] produces a [`FormatWarning`], never an error.
#[derive(Debug, Clone)]
pub struct Header {
    inner: RestrictedParagraph,
}

impl Header {
    /// Creates a fresh header with `Format` set to [`CURRENT_FORMAT`].
    pub fn new() -> Self {
        let mut stanza = RawStanza::new();
        stanza.set("Format", CURRENT_FORMAT);
        Self {
            inner: RestrictedParagraph::new(stanza, HEADER_FIELDS),
        }
    }

    /// Wraps an existing stanza as a header.
    ///
    /// Returns the header together with an advisory warning when the
    /// `Format` value is superseded or unknown.
    ///
    /// # Errors
    ///
    /// [`Error::NotMachineReadable`] if the stanza has no `Format` field.
    pub fn from_stanza(stanza: RawStanza) -> Result<(Self, Option<FormatWarning>), Error> {
        let header = Self {
            inner: RestrictedParagraph::new(stanza, HEADER_FIELDS),
        };
        let Some(format) = header.inner.raw().get("Format") else {
            return Err(Error::NotMachineReadable);
        };
        let warning = if format == CURRENT_FORMAT {
            None
        } else if KNOWN_FORMATS.contains(&format) {
            Some(FormatWarning::Superseded(format.to_string()))
        } else {
            Some(FormatWarning::Unknown(format.to_string()))
        };
        if let Some(warning) = &warning {
            warn!(%warning, "copyright header format");
        }
        Ok((header, warning))
    }

    /// The `Format` URI. Present on every constructed header.
    pub fn format(&self) -> String {
        // Construction guarantees presence; the fallback is never taken.
        self.inner
            .raw()
            .get("Format")
            .unwrap_or(CURRENT_FORMAT)
            .to_string()
    }

    /// Replaces the `Format` URI.
    pub fn set_format(&mut self, format: &str) -> Result<(), Error> {
        self.inner
            .set("Format", Some(&FieldValue::Text(format.to_string())))
    }

    /// Returns true iff the format is one of [`KNOWN_FORMATS`].
    pub fn known_format(&self) -> bool {
        KNOWN_FORMATS.contains(&self.format().as_str())
    }

    /// Returns true iff the format is [`CURRENT_FORMAT`].
    pub fn current_format(&self) -> bool {
        self.format() == CURRENT_FORMAT
    }

    /// The upstream project name, if declared.
    pub fn upstream_name(&self) -> Result<Option<String>, Error> {
        self.text_field("Upstream-Name")
    }

    /// Sets or clears the upstream project name.
    pub fn set_upstream_name(&mut self, name: Option<&str>) -> Result<(), Error> {
        self.set_text_field("Upstream-Name", name)
    }

    /// The upstream contact addresses, in declaration order.
    pub fn upstream_contact(&self) -> Result<Vec<String>, Error> {
        match self.inner.get("Upstream-Contact")? {
            Some(FieldValue::Lines(lines)) => Ok(lines),
            _ => Ok(Vec::new()),
        }
    }

    /// Replaces the upstream contact list. An empty list clears the field.
    pub fn set_upstream_contact(&mut self, contact: &[String]) -> Result<(), Error> {
        self.inner
            .set("Upstream-Contact", Some(&FieldValue::Lines(contact.to_vec())))
    }

    /// The `Source` field, if declared.
    pub fn source(&self) -> Result<Option<String>, Error> {
        self.text_field("Source")
    }

    /// Sets or clears the `Source` field.
    pub fn set_source(&mut self, source: Option<&str>) -> Result<(), Error> {
        self.set_text_field("Source", source)
    }

    /// The `Disclaimer` field, if declared.
    pub fn disclaimer(&self) -> Result<Option<String>, Error> {
        self.text_field("Disclaimer")
    }

    /// Sets or clears the `Disclaimer` field.
    pub fn set_disclaimer(&mut self, disclaimer: Option<&str>) -> Result<(), Error> {
        self.set_text_field("Disclaimer", disclaimer)
    }

    /// The `Comment` field, if declared.
    pub fn comment(&self) -> Result<Option<String>, Error> {
        self.text_field("Comment")
    }

    /// Sets or clears the `Comment` field.
    pub fn set_comment(&mut self, comment: Option<&str>) -> Result<(), Error> {
        self.set_text_field("Comment", comment)
    }

    /// The header-wide `Copyright` notice, if declared.
    pub fn copyright(&self) -> Result<Option<String>, Error> {
        self.text_field("Copyright")
    }

    /// Sets or clears the header-wide `Copyright` notice.
    pub fn set_copyright(&mut self, copyright: Option<&str>) -> Result<(), Error> {
        self.set_text_field("Copyright", copyright)
    }

    /// The header-wide `License`, if declared.
    pub fn license(&self) -> Result<Option<License>, Error> {
        match self.inner.get("License")? {
            Some(FieldValue::License(license)) => Ok(Some(license)),
            _ => Ok(None),
        }
    }

    /// Sets or clears the header-wide `License`.
    pub fn set_license(&mut self, license: Option<&License>) -> Result<(), Error> {
        self.inner.set(
            "License",
            license.map(|l| FieldValue::License(l.clone())).as_ref(),
        )
    }

    /// Decodes a declared field by key. See [`RestrictedParagraph::get`].
    pub fn get(&self, key: &str) -> Result<Option<FieldValue>, Error> {
        self.inner.get(key)
    }

    /// Writes a declared field by key. See [`RestrictedParagraph::set`].
    pub fn set(&mut self, key: &str, value: Option<&FieldValue>) -> Result<(), Error> {
        self.inner.set(key, value)
    }

    /// Whether the key is present in the backing stanza.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    /// The backing stanza.
    pub fn raw(&self) -> &RawStanza {
        self.inner.raw()
    }

    fn text_field(&self, key: &str) -> Result<Option<String>, Error> {
        match self.inner.get(key)? {
            Some(FieldValue::Text(text)) => Ok(Some(text)),
            _ => Ok(None),
        }
    }

    fn set_text_field(&mut self, key: &str, value: Option<&str>) -> Result<(), Error> {
        self.inner.set(
            key,
            value.map(|v| FieldValue::Text(v.to_string())).as_ref(),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_fresh_header_has_current_format() {
        let header = Header::new();
        assert_eq!(header.format(), CURRENT_FORMAT);
        assert!(header.known_format());
        assert!(header.current_format());
    }

    #[test]
    fn test_format_cannot_be_cleared() {
        let mut header = Header::new();
        let err = header.set("Format", None).unwrap_err();
        assert_eq!(err.to_string(), "value must not be None");
        assert_eq!(header.format(), CURRENT_FORMAT);
    }

    #[test]
    fn test_missing_format_is_not_machine_readable() {
        let mut stanza = RawStanza::new();
        stanza.set("Upstream-Name", "Foo");
        let err = Header::from_stanza(stanza).unwrap_err();
        assert_eq!(err, Error::NotMachineReadable);
    }

    #[test]
    fn test_current_format_has_no_warning() {
        let mut stanza = RawStanza::new();
        stanza.set("Format", CURRENT_FORMAT);
        let (header, warning) = Header::from_stanza(stanza).unwrap();
        assert!(warning.is_none());
        assert!(header.current_format());
    }

    #[test]
    fn test_https_format_warns_but_succeeds() {
        let https = "https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/";
        let mut stanza = RawStanza::new();
        stanza.set("Format", https);
        let (header, warning) = Header::from_stanza(stanza).unwrap();
        assert_eq!(warning, Some(FormatWarning::Superseded(https.to_string())));
        assert!(header.known_format());
        assert!(!header.current_format());
    }

    #[test]
    fn test_unknown_format_warns_but_succeeds() {
        let mut stanza = RawStanza::new();
        stanza.set("Format", "http://example.com/format/2.0/");
        let (header, warning) = Header::from_stanza(stanza).unwrap();
        assert!(matches!(warning, Some(FormatWarning::Unknown(_))));
        assert!(!header.known_format());
        assert_eq!(header.format(), "http://example.com/format/2.0/");
    }

    #[test]
    fn test_upstream_name_single_line() {
        let mut header = Header::new();
        header.set_upstream_name(Some("Foo Bar")).unwrap();
        assert_eq!(header.upstream_name().unwrap().as_deref(), Some("Foo Bar"));

        let err = header.set_upstream_name(Some("Foo Bar\n Baz")).unwrap_err();
        assert_eq!(err.to_string(), "must be single line");
        assert_eq!(header.upstream_name().unwrap().as_deref(), Some("Foo Bar"));
    }

    #[test]
    fn test_upstream_contact_single() {
        let mut header = Header::new();
        header
            .set_upstream_contact(&["Foo Bar <foo@bar.com>".to_string()])
            .unwrap();
        assert_eq!(header.upstream_contact().unwrap(), vec!["Foo Bar <foo@bar.com>"]);
        assert_eq!(header.raw().get("Upstream-Contact"), Some("Foo Bar <foo@bar.com>"));
    }

    #[test]
    fn test_upstream_contact_multi() {
        let mut header = Header::new();
        header
            .set_upstream_contact(&[
                "Foo Bar <foo@bar.com>".to_string(),
                "http://bar.com/foo".to_string(),
            ])
            .unwrap();
        assert_eq!(
            header.upstream_contact().unwrap(),
            vec!["Foo Bar <foo@bar.com>", "http://bar.com/foo"]
        );
        assert_eq!(
            header.raw().get("upstream-contact"),
            Some("\n Foo Bar <foo@bar.com>\n http://bar.com/foo")
        );
    }

    #[test]
    fn test_upstream_contact_reads_wire_with_leading_blank() {
        let mut stanza = RawStanza::new();
        stanza.set("Format", CURRENT_FORMAT);
        stanza.set("Upstream-Contact", "\n Foo Bar <foo@bar.com>\n http://bar.com/foo");
        let (header, _) = Header::from_stanza(stanza).unwrap();
        assert_eq!(
            header.upstream_contact().unwrap(),
            vec!["Foo Bar <foo@bar.com>", "http://bar.com/foo"]
        );
    }

    #[test]
    fn test_license_set_and_clear() {
        let mut header = Header::new();
        assert!(header.license().unwrap().is_none());

        let license = License::new("GPL-2+", "").unwrap();
        header.set_license(Some(&license)).unwrap();
        assert_eq!(header.license().unwrap(), Some(license));
        assert_eq!(header.raw().get("license"), Some("GPL-2+"));

        header.set_license(None).unwrap();
        assert!(header.license().unwrap().is_none());
        assert!(!header.contains("license"));
    }

    #[test]
    fn test_undeclared_field_is_restricted() {
        let mut header = Header::new();
        let err = header
            .set("Files", Some(&FieldValue::Text("*".to_string())))
            .unwrap_err();
        assert!(matches!(err, Error::RestrictedField(_)));
        assert!(!matches!(
            err,
            Error::Validation(ValidationError::ValueRequired)
        ));
    }
}
