//! Locale detection: turning cookie and header fragments into locales.
//!
//! Parsing of the tags themselves is delegated to `unic-langid` (BCP-47
//! language identifiers); anything that crate rejects is simply
//! "undetectable" and the caller's fallback chain continues.

use unic_langid::LanguageIdentifier;

/// A detected locale (e.g. "en", "de-AT").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(LanguageIdentifier);

impl Locale {
    /// The base language subtag (e.g. "de" for "de-AT").
    pub fn language(&self) -> &str {
        self.0.language.as_str()
    }
}

/// Detects locales from the request fields that can carry one.
///
/// Detection never fails hard: a malformed or empty input yields `None`
/// and the resolver moves on to its next source.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleDetector;

impl LocaleDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect a locale from a single locale tag (the cookie value).
    ///
    /// # Returns
    /// `Some(Locale)` if the trimmed tag parses as a language identifier,
    /// `None` otherwise.
    pub fn detect_from_tag(&self, tag: &str) -> Option<Locale> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }
        tag.parse::<LanguageIdentifier>().ok().map(Locale)
    }

    /// Detect a locale from an `Accept-Language` header string.
    ///
    /// Only the leading comma-separated part is read; quality-weighting
    /// parameters (`;q=0.8`) are stripped before parsing. The caller decides
    /// what to do with the rest of the string.
    pub fn detect_from_header(&self, header: &str) -> Option<Locale> {
        let first = header.split(',').next().unwrap_or(header);
        let tag = first.split(';').next().unwrap_or(first);
        self.detect_from_tag(tag)
    }
}
