//! Restricted paragraphs and the concrete paragraph kinds.
//!
//! A [`RestrictedParagraph`] wraps one [`RawStanza`] together with a static
//! table of declared fields. Only declared keys may be read or written
//! through the typed accessors; everything else fails with a
//! [`RestrictedFieldError`]. The three concrete kinds — [`Header`],
//! [`FilesParagraph`] and [`LicenseParagraph`] — each own one such table.
//!
//! The declared key sets of `FilesParagraph` and `LicenseParagraph` are
//! disjoint on the keys that identify them, which is how structurally
//! ambiguous documents are rejected: constructing the wrong kind over a
//! stanza bearing the other kind's required key fails at construction time.

mod files;
mod header;
mod license_paragraph;

pub use files::FilesParagraph;
pub use header::{FormatWarning, Header, CURRENT_FORMAT, KNOWN_FORMATS};
pub use license_paragraph::LicenseParagraph;

use crate::deb822::RawStanza;
use crate::error::{Error, FormatError, RestrictedFieldError, ValidationError};
use crate::fields::{Codec, FieldValue};

/// One declared field of a paragraph kind.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Canonical key spelling, used when the field is first written.
    pub name: &'static str,
    /// Wire codec for this field.
    pub codec: Codec,
    /// Required fields must be present at construction and reject being
    /// set to an absent value.
    pub required: bool,
}

/// A raw stanza plus the declared field set that restricts access to it.
///
/// Reads decode lazily from the current raw state; writes re-encode and
/// overwrite the raw value, so there is no cached value to go stale. A
/// failed `set` commits nothing.
#[derive(Debug, Clone)]
pub struct RestrictedParagraph {
    stanza: RawStanza,
    fields: &'static [FieldSpec],
}

impl RestrictedParagraph {
    pub(crate) fn new(stanza: RawStanza, fields: &'static [FieldSpec]) -> Self {
        Self { stanza, fields }
    }

    fn field(&self, key: &str) -> Result<&FieldSpec, RestrictedFieldError> {
        self.fields
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| RestrictedFieldError(key.to_string()))
    }

    /// Decodes the current value of a declared field.
    ///
    /// Returns `Ok(None)` if the key is absent from the backing stanza.
    ///
    /// # Errors
    ///
    /// [`RestrictedFieldError`] if the key is not declared for this
    /// paragraph kind; decode errors from the field's codec otherwise.
    pub fn get(&self, key: &str) -> Result<Option<FieldValue>, Error> {
        let spec = self.field(key)?;
        match self.stanza.get(key) {
            Some(raw) => spec.codec.decode(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Encodes `value` and writes it into the backing stanza.
    ///
    /// `None` — or a value that encodes to absent, such as an empty list —
    /// deletes the key on an optional field and fails with
    /// [`ValidationError::ValueRequired`] on a required one.
    pub fn set(&mut self, key: &str, value: Option<&FieldValue>) -> Result<(), Error> {
        let spec = *self.field(key)?;
        let encoded = match value {
            Some(value) => spec.codec.encode(value)?,
            None => None,
        };
        match encoded {
            Some(raw) => self.stanza.set(spec.name, raw),
            None if spec.required => return Err(ValidationError::ValueRequired.into()),
            None => {
                self.stanza.remove(spec.name);
            }
        }
        Ok(())
    }

    /// Whether the key is currently present in the backing stanza,
    /// regardless of whether it was ever touched through a typed accessor.
    pub fn contains(&self, key: &str) -> bool {
        self.stanza.contains_key(key)
    }

    /// The backing stanza.
    pub fn raw(&self) -> &RawStanza {
        &self.stanza
    }

    /// Fails unless every required field of the declared set is present.
    fn check_required(&self) -> Result<(), Error> {
        for spec in self.fields {
            if spec.required && !self.stanza.contains_key(spec.name) {
                return Err(ValidationError::MissingRequiredField(spec.name).into());
            }
        }
        Ok(())
    }
}

/// A classified body paragraph of a copyright document.
#[derive(Debug, Clone)]
pub enum Paragraph {
    /// A `Files` stanza: globs plus copyright and license attribution.
    Files(FilesParagraph),
    /// A standalone license definition.
    License(LicenseParagraph),
}

impl Paragraph {
    /// Classifies a raw stanza by its key shape: a `Files` key makes it a
    /// Files paragraph, otherwise a `License` key makes it a license
    /// paragraph.
    ///
    /// # Errors
    ///
    /// [`FormatError::UnclassifiableParagraph`] when the stanza bears
    /// neither key; construction errors of the selected kind otherwise.
    pub fn from_stanza(stanza: RawStanza) -> Result<Self, Error> {
        if stanza.contains_key("Files") {
            FilesParagraph::from_stanza(stanza).map(Paragraph::Files)
        } else if stanza.contains_key("License") {
            LicenseParagraph::from_stanza(stanza).map(Paragraph::License)
        } else {
            Err(FormatError::UnclassifiableParagraph.into())
        }
    }

    /// This paragraph as a Files paragraph, if it is one.
    pub fn as_files(&self) -> Option<&FilesParagraph> {
        match self {
            Paragraph::Files(p) => Some(p),
            Paragraph::License(_) => None,
        }
    }

    /// This paragraph as a license paragraph, if it is one.
    pub fn as_license(&self) -> Option<&LicenseParagraph> {
        match self {
            Paragraph::Files(_) => None,
            Paragraph::License(p) => Some(p),
        }
    }

    /// The backing stanza.
    pub fn raw(&self) -> &RawStanza {
        match self {
            Paragraph::Files(p) => p.raw(),
            Paragraph::License(p) => p.raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_FIELDS: &[FieldSpec] = &[
        FieldSpec {
            name: "Name",
            codec: Codec::SingleLine,
            required: true,
        },
        FieldSpec {
            name: "Aliases",
            codec: Codec::LineList,
            required: false,
        },
    ];

    fn paragraph() -> RestrictedParagraph {
        let mut stanza = RawStanza::new();
        stanza.set("Name", "foo");
        RestrictedParagraph::new(stanza, TEST_FIELDS)
    }

    #[test]
    fn test_get_declared_field() {
        let p = paragraph();
        assert_eq!(
            p.get("Name").unwrap(),
            Some(FieldValue::Text("foo".to_string()))
        );
        assert_eq!(p.get("name").unwrap(), p.get("NAME").unwrap());
    }

    #[test]
    fn test_get_absent_optional_field() {
        let p = paragraph();
        assert_eq!(p.get("Aliases").unwrap(), None);
    }

    #[test]
    fn test_get_undeclared_field_is_restricted() {
        let p = paragraph();
        let err = p.get("Files").unwrap_err();
        assert!(matches!(err, Error::RestrictedField(_)));
    }

    #[test]
    fn test_set_undeclared_field_is_restricted() {
        let mut p = paragraph();
        let err = p
            .set("Files", Some(&FieldValue::Text("x".to_string())))
            .unwrap_err();
        assert!(matches!(err, Error::RestrictedField(_)));
    }

    #[test]
    fn test_set_required_to_none_fails() {
        let mut p = paragraph();
        let err = p.set("Name", None).unwrap_err();
        assert_eq!(err.to_string(), "value must not be None");
        // Nothing was committed.
        assert_eq!(p.raw().get("Name"), Some("foo"));
    }

    #[test]
    fn test_set_optional_to_none_deletes() {
        let mut p = paragraph();
        p.set(
            "Aliases",
            Some(&FieldValue::Lines(vec!["bar".to_string()])),
        )
        .unwrap();
        assert!(p.contains("Aliases"));
        p.set("Aliases", None).unwrap();
        assert!(!p.contains("Aliases"));
    }

    #[test]
    fn test_set_empty_list_deletes_optional_field() {
        let mut p = paragraph();
        p.set("Aliases", Some(&FieldValue::Lines(vec!["bar".to_string()])))
            .unwrap();
        p.set("Aliases", Some(&FieldValue::Lines(Vec::new()))).unwrap();
        assert!(!p.contains("Aliases"));
    }

    #[test]
    fn test_failed_set_commits_nothing() {
        let mut p = paragraph();
        let err = p
            .set("Name", Some(&FieldValue::Text("a\nb".to_string())))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(p.raw().get("Name"), Some("foo"));
    }

    #[test]
    fn test_contains_reflects_raw_state() {
        let mut stanza = RawStanza::new();
        stanza.set("Name", "foo");
        stanza.set("Undeclared", "zzz");
        let p = RestrictedParagraph::new(stanza, TEST_FIELDS);
        // Present in the stanza even though never writable through `set`.
        assert!(p.contains("Undeclared"));
        assert!(!p.contains("Aliases"));
    }

    #[test]
    fn test_classify_files() {
        let mut stanza = RawStanza::new();
        stanza.set("Files", "*");
        stanza.set("Copyright", "Foo");
        stanza.set("License", "ISC");
        let p = Paragraph::from_stanza(stanza).unwrap();
        assert!(p.as_files().is_some());
        assert!(p.as_license().is_none());
    }

    #[test]
    fn test_classify_license() {
        let mut stanza = RawStanza::new();
        stanza.set("License", "ISC");
        let p = Paragraph::from_stanza(stanza).unwrap();
        assert!(p.as_license().is_some());
    }

    #[test]
    fn test_classify_neither_is_a_format_error() {
        let mut stanza = RawStanza::new();
        stanza.set("Comment", "nothing to see");
        let err = Paragraph::from_stanza(stanza).unwrap_err();
        assert_eq!(
            err,
            Error::Format(FormatError::UnclassifiableParagraph)
        );
    }
}
