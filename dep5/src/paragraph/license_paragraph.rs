//! Standalone license paragraphs.

use crate::deb822::RawStanza;
use crate::error::{Error, ValidationError};
use crate::fields::{Codec, FieldValue};
use crate::license::License;
use crate::paragraph::{FieldSpec, RestrictedParagraph};

static LICENSE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "License",
        codec: Codec::License,
        required: true,
    },
    FieldSpec {
        name: "Comment",
        codec: Codec::Multiline,
        required: false,
    },
];

/// A body paragraph that defines a license on its own, without attributing
/// any files. Typically used to spell out the full text of a license that
/// several `Files` paragraphs reference by synopsis.
#[derive(Debug, Clone)]
pub struct LicenseParagraph {
    inner: RestrictedParagraph,
}

impl LicenseParagraph {
    /// Wraps an existing stanza as a license paragraph.
    ///
    /// # Errors
    ///
    /// [`ValidationError::LooksLikeFilesParagraph`] if the stanza carries a
    /// `Files` key — that shape belongs to
    /// [`FilesParagraph`](crate::paragraph::FilesParagraph) — and
    /// [`ValidationError::MissingRequiredField`] if `License` is absent.
    pub fn from_stanza(stanza: RawStanza) -> Result<Self, Error> {
        if stanza.contains_key("Files") {
            return Err(ValidationError::LooksLikeFilesParagraph.into());
        }
        let paragraph = Self {
            inner: RestrictedParagraph::new(stanza, LICENSE_FIELDS),
        };
        paragraph.inner.check_required()?;
        Ok(paragraph)
    }

    /// The license this paragraph defines.
    pub fn license(&self) -> Result<License, Error> {
        match self.inner.get("License")? {
            Some(FieldValue::License(license)) => Ok(license),
            _ => Err(ValidationError::MissingRequiredField("License").into()),
        }
    }

    /// Replaces the license.
    pub fn set_license(&mut self, license: &License) -> Result<(), Error> {
        self.inner
            .set("License", Some(&FieldValue::License(license.clone())))
    }

    /// The `Comment` field, if declared.
    pub fn comment(&self) -> Result<Option<String>, Error> {
        match self.inner.get("Comment")? {
            Some(FieldValue::Text(text)) => Ok(Some(text)),
            _ => Ok(None),
        }
    }

    /// Sets or clears the `Comment` field.
    pub fn set_comment(&mut self, comment: Option<&str>) -> Result<(), Error> {
        self.inner.set(
            "Comment",
            comment.map(|c| FieldValue::Text(c.to_string())).as_ref(),
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
}
