//! Preset resolution: the cookie -> header -> default priority chain.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::i18n::{LanguagePreset, Locale, LocaleDetector, PresetSource, LANGUAGE_DIMENSION};

/// Fatal resolution failure.
///
/// Every per-source miss (undetectable tag, unknown language) just moves the
/// chain along; this error only fires once all three sources are exhausted,
/// which means the dimension configuration lacks a default preset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error(
        "no language preset matched the request and no default preset is configured; \
         check the language dimension presets"
    )]
    NoPresetAvailable,
}

/// How the `Accept-Language` header is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStrategy {
    /// Re-detect from the whole remaining header string, dropping the first
    /// comma-separated part on each miss. This reproduces the site's
    /// long-standing behavior and is the default.
    DropFirst,
    /// Standard quality-aware negotiation: order candidates by descending
    /// q-value, then try them one by one.
    Quality,
}

#[derive(Debug, Error)]
#[error("unknown header strategy '{0}', expected 'drop-first' or 'quality'")]
pub struct UnknownStrategy(String);

impl FromStr for HeaderStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop-first" => Ok(HeaderStrategy::DropFirst),
            "quality" => Ok(HeaderStrategy::Quality),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

/// Resolves the best-matching language preset for a request.
///
/// Priority chain, first success wins: frontend language cookie, then the
/// `Accept-Language` header, then the configured default preset. Holds only
/// read-only collaborators, so a single instance is shared across all
/// requests without locking.
pub struct PresetResolver {
    detector: LocaleDetector,
    presets: Arc<dyn PresetSource>,
    overrides: HashMap<String, String>,
    strategy: HeaderStrategy,
}

impl PresetResolver {
    pub fn new(
        detector: LocaleDetector,
        presets: Arc<dyn PresetSource>,
        overrides: HashMap<String, String>,
        strategy: HeaderStrategy,
    ) -> Self {
        Self {
            detector,
            presets,
            overrides,
            strategy,
        }
    }

    /// Resolve a preset from the request's cookie and header values.
    ///
    /// Empty or missing inputs are treated as absent, not as errors; an
    /// undetectable locale tag is a miss, not an error. Fails only when no
    /// source yields a preset and no default preset is configured.
    pub fn resolve(
        &self,
        cookie_value: Option<&str>,
        accept_language: Option<&str>,
    ) -> Result<LanguagePreset, ResolveError> {
        if let Some(cookie) = cookie_value {
            if let Some(preset) = self.find_by_cookie(cookie) {
                return Ok(preset);
            }
        }

        if let Some(header) = accept_language {
            let found = match self.strategy {
                HeaderStrategy::DropFirst => self.find_by_header_drop_first(header),
                HeaderStrategy::Quality => self.find_by_header_quality(header),
            };
            if let Some(preset) = found {
                return Ok(preset);
            }
        }

        self.presets
            .default_preset(LANGUAGE_DIMENSION)
            .ok_or(ResolveError::NoPresetAvailable)
    }

    /// Apply the override map to a detected locale and look up its preset.
    fn lookup(&self, locale: &Locale) -> Option<LanguagePreset> {
        let code = locale.language();
        let code = self.overrides.get(code).map(String::as_str).unwrap_or(code);
        self.presets.find_by_uri_segment(LANGUAGE_DIMENSION, code)
    }

    fn find_by_cookie(&self, cookie: &str) -> Option<LanguagePreset> {
        let locale = self.detector.detect_from_tag(cookie)?;
        self.lookup(&locale)
    }

    /// Walk the header by re-detecting from the entire remaining string and
    /// dropping the first comma-separated part on each miss. Malformed or
    /// unsupported leading tags are skipped one at a time until a workable
    /// tag is found or the header is exhausted.
    fn find_by_header_drop_first(&self, header: &str) -> Option<LanguagePreset> {
        let mut parts: Vec<&str> = header.split(',').collect();
        let mut remaining = header.to_string();

        while !remaining.is_empty() {
            if let Some(locale) = self.detector.detect_from_header(&remaining) {
                if let Some(preset) = self.lookup(&locale) {
                    return Some(preset);
                }
            }

            parts.remove(0);
            remaining = parts.join(",");
        }

        None
    }

    /// Standard negotiation: every `tag;q=...` part becomes a candidate,
    /// ordered by descending q-value (stable for ties, so equal weights keep
    /// the client's listed order; missing q defaults to 1.0, unparseable q
    /// counts as 0).
    fn find_by_header_quality(&self, header: &str) -> Option<LanguagePreset> {
        let mut candidates: Vec<(&str, f32)> = header
            .split(',')
            .filter_map(|part| {
                let mut pieces = part.split(';');
                let tag = pieces.next().unwrap_or(part).trim();
                if tag.is_empty() {
                    return None;
                }
                let quality = pieces
                    .find_map(|piece| piece.trim().strip_prefix("q="))
                    .map(|value| value.parse::<f32>().unwrap_or(0.0))
                    .unwrap_or(1.0);
                Some((tag, quality))
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
        });

        candidates.into_iter().find_map(|(tag, _)| {
            let locale = self.detector.detect_from_tag(tag)?;
            self.lookup(&locale)
        })
    }
}
