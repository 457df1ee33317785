//! `Files` paragraphs: glob patterns with copyright and license
//! attribution.

use std::sync::OnceLock;

use crate::deb822::RawStanza;
use crate::error::{Error, FormatError, ValidationError};
use crate::fields::{Codec, FieldValue};
use crate::glob::{self, GlobSet};
use crate::license::License;
use crate::multiline::format_multiline;
use crate::paragraph::{FieldSpec, RestrictedParagraph};

static FILES_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "Files",
        codec: Codec::SpaceSeparated,
        required: true,
    },
    FieldSpec {
        name: "Copyright",
        codec: Codec::Multiline,
        required: true,
    },
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

/// A body paragraph attributing a set of file patterns to a copyright
/// notice and a license.
///
/// Owns a lazily compiled glob matcher derived from the current `Files`
/// value. The matcher is discarded whenever `Files` is reassigned, so
/// [`matches`](Self::matches) never observes a stale pattern set.
#[derive(Debug, Clone)]
pub struct FilesParagraph {
    inner: RestrictedParagraph,
    matcher: OnceLock<Result<GlobSet, FormatError>>,
}

impl FilesParagraph {
    /// Wraps an existing stanza as a `Files` paragraph.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingRequiredField`] if any of `Files`,
    /// `Copyright` or `License` is absent.
    pub fn from_stanza(stanza: RawStanza) -> Result<Self, Error> {
        let paragraph = Self {
            inner: RestrictedParagraph::new(stanza, FILES_FIELDS),
            matcher: OnceLock::new(),
        };
        paragraph.inner.check_required()?;
        Ok(paragraph)
    }

    /// Builds a fresh paragraph from typed values.
    ///
    /// # Errors
    ///
    /// Fails with [`ValidationError::ValueRequired`] for an empty pattern
    /// list, and with the usual codec errors for invalid patterns or
    /// copyright text.
    pub fn create<S: AsRef<str>>(
        files: &[S],
        copyright: &str,
        license: &License,
    ) -> Result<Self, Error> {
        let tokens = FieldValue::Tokens(
            files.iter().map(|s| s.as_ref().to_string()).collect(),
        );
        let wire_files = Codec::SpaceSeparated
            .encode(&tokens)?
            .ok_or(ValidationError::ValueRequired)?;
        let mut stanza = RawStanza::new();
        stanza.set("Files", wire_files);
        stanza.set("Copyright", format_multiline(copyright));
        stanza.set("License", license.to_wire());
        Self::from_stanza(stanza)
    }

    /// The glob patterns of the `Files` field, in declaration order.
    pub fn files(&self) -> Vec<String> {
        match self.inner.get("Files") {
            Ok(Some(FieldValue::Tokens(tokens))) => tokens,
            _ => Vec::new(),
        }
    }

    /// Replaces the glob patterns. The compiled matcher is rebuilt on the
    /// next [`matches`](Self::matches) call.
    pub fn set_files<S: AsRef<str>>(&mut self, files: &[S]) -> Result<(), Error> {
        let tokens = FieldValue::Tokens(
            files.iter().map(|s| s.as_ref().to_string()).collect(),
        );
        self.inner.set("Files", Some(&tokens))?;
        self.matcher = OnceLock::new();
        Ok(())
    }

    /// Returns true iff one of the paragraph's glob patterns matches the
    /// whole of `path`.
    ///
    /// # Errors
    ///
    /// Propagates glob compile errors ([`FormatError::InvalidEscape`],
    /// [`FormatError::TrailingBackslash`]) from the current `Files` value.
    pub fn matches(&self, path: &str) -> Result<bool, Error> {
        let compiled = self.matcher.get_or_init(|| glob::compile(&self.files()));
        match compiled {
            Ok(set) => Ok(set.is_match(path)),
            Err(err) => Err(err.clone().into()),
        }
    }

    /// The copyright notice, in logical form.
    pub fn copyright(&self) -> Result<String, Error> {
        match self.inner.get("Copyright")? {
            Some(FieldValue::Text(text)) => Ok(text),
            _ => Err(ValidationError::MissingRequiredField("Copyright").into()),
        }
    }

    /// Replaces the copyright notice.
    pub fn set_copyright(&mut self, copyright: &str) -> Result<(), Error> {
        self.inner
            .set("Copyright", Some(&FieldValue::Text(copyright.to_string())))
    }

    /// The license attributed to the matched files.
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
    ///
    /// Writing `Files` through this path also discards the compiled
    /// matcher.
    pub fn set(&mut self, key: &str, value: Option<&FieldValue>) -> Result<(), Error> {
        self.inner.set(key, value)?;
        if key.eq_ignore_ascii_case("Files") {
            self.matcher = OnceLock::new();
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    fn prototype() -> RawStanza {
        let mut stanza = RawStanza::new();
        stanza.set("Files", "*");
        stanza.set("Copyright", "Foo");
        stanza.set("License", "ISC");
        stanza
    }

    #[test]
    fn test_files_property() {
        let mut fp = FilesParagraph::from_stanza(prototype()).unwrap();
        assert_eq!(fp.files(), vec!["*"]);

        fp.set_files(&["debian/*"]).unwrap();
        assert_eq!(fp.files(), vec!["debian/*"]);
        assert_eq!(fp.raw().get("files"), Some("debian/*"));

        fp.set_files(&["src/foo/*", "src/bar/*"]).unwrap();
        assert_eq!(fp.files(), vec!["src/foo/*", "src/bar/*"]);
        assert_eq!(fp.raw().get("files"), Some("src/foo/* src/bar/*"));
    }

    #[test]
    fn test_files_reads_lenient_wire_layout() {
        let mut stanza = prototype();
        stanza.set("Files", "foo/*\tbar/*\n\tbaz/*\n quux/*");
        let fp = FilesParagraph::from_stanza(stanza).unwrap();
        assert_eq!(fp.files(), vec!["foo/*", "bar/*", "baz/*", "quux/*"]);
    }

    #[test]
    fn test_files_cannot_be_emptied() {
        let mut fp = FilesParagraph::from_stanza(prototype()).unwrap();
        let err = fp.set_files::<&str>(&[]).unwrap_err();
        assert_eq!(err.to_string(), "value must not be None");
        assert_eq!(fp.files(), vec!["*"]);
    }

    #[test]
    fn test_missing_required_fields() {
        for missing in ["Files", "Copyright", "License"] {
            let mut stanza = prototype();
            stanza.remove(missing);
            let err = FilesParagraph::from_stanza(stanza).unwrap_err();
            if missing == "Files" {
                // Without a Files key the stanza is not a Files paragraph
                // at all, but wrapping it as one must still fail.
                assert_eq!(err.to_string(), "\"Files\" field required");
            } else {
                assert_eq!(err.to_string(), format!("{:?} field required", missing));
            }
        }
    }

    #[test]
    fn test_license_property() {
        let mut fp = FilesParagraph::from_stanza(prototype()).unwrap();
        assert_eq!(fp.license().unwrap(), License::new("ISC", "").unwrap());

        fp.set_license(&License::new("ISC", "[LICENSE TEXT]").unwrap())
            .unwrap();
        assert_eq!(
            fp.license().unwrap(),
            License::new("ISC", "[LICENSE TEXT]").unwrap()
        );
        assert_eq!(fp.raw().get("license"), Some("ISC\n [LICENSE TEXT]"));
    }

    #[test]
    fn test_copyright_property() {
        let fp = FilesParagraph::from_stanza(prototype()).unwrap();
        assert_eq!(fp.copyright().unwrap(), "Foo");
    }

    #[test]
    fn test_matches_follows_files_reassignment() {
        let mut fp = FilesParagraph::from_stanza(prototype()).unwrap();
        assert!(fp.matches("foo/bar.cc").unwrap());
        assert!(fp.matches("Makefile").unwrap());
        assert!(fp.matches("debian/rules").unwrap());

        fp.set_files(&["debian/*"]).unwrap();
        assert!(!fp.matches("foo/bar.cc").unwrap());
        assert!(!fp.matches("Makefile").unwrap());
        assert!(fp.matches("debian/rules").unwrap());

        fp.set_files(&["Makefile", "foo/*"]).unwrap();
        assert!(fp.matches("foo/bar.cc").unwrap());
        assert!(fp.matches("Makefile").unwrap());
        assert!(!fp.matches("debian/rules").unwrap());
    }

    #[test]
    fn test_matches_reports_bad_glob() {
        let mut stanza = prototype();
        stanza.set("Files", r"foo/a\b.c");
        let fp = FilesParagraph::from_stanza(stanza).unwrap();
        let err = fp.matches("foo/ab.c").unwrap_err();
        assert_eq!(err.to_string(), "invalid escape sequence: \\b");
        // The compile failure is stable across calls.
        assert!(fp.matches("anything").is_err());
    }

    #[test]
    fn test_generic_set_of_files_rebuilds_matcher() {
        let mut fp = FilesParagraph::from_stanza(prototype()).unwrap();
        assert!(fp.matches("debian/rules").unwrap());
        fp.set(
            "Files",
            Some(&FieldValue::Tokens(vec!["src/*".to_string()])),
        )
        .unwrap();
        assert!(!fp.matches("debian/rules").unwrap());
        assert!(fp.matches("src/lib.rs").unwrap());
    }

    #[test]
    fn test_create() {
        let fp = FilesParagraph::create(
            &["Makefile", "foo/*"],
            "Copyright 2014 Some Guy",
            &License::new("ISC", "").unwrap(),
        )
        .unwrap();
        assert_eq!(fp.files(), vec!["Makefile", "foo/*"]);
        assert_eq!(fp.copyright().unwrap(), "Copyright 2014 Some Guy");
        assert_eq!(fp.license().unwrap(), License::new("ISC", "").unwrap());
        let keys: Vec<&str> = fp.raw().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Files", "Copyright", "License"]);
    }

    #[test]
    fn test_create_rejects_empty_files() {
        let err = FilesParagraph::create::<&str>(
            &[],
            "Copyright 2014 Some Guy",
            &License::new("ISC", "").unwrap(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "value must not be None");
    }

    #[test]
    fn test_setting_undeclared_key_is_restricted() {
        let mut fp = FilesParagraph::from_stanza(prototype()).unwrap();
        let err = fp
            .set("Upstream-Name", Some(&FieldValue::Text("x".to_string())))
            .unwrap_err();
        assert!(matches!(err, Error::RestrictedField(_)));
    }
}
