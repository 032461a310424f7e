//! Content dimension presets: the configured language variants of the site.
//!
//! Mirrors the content-dimension configuration shape the site already uses:
//! a dimension (here always "language") carries a set of presets, each with a
//! URI segment, plus an optional default preset. Loaded once at startup and
//! never mutated afterwards.

use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::Deserialize;

/// The dimension this service negotiates.
pub const LANGUAGE_DIMENSION: &str = "language";

/// Deserialized dimension configuration (`LANGUAGE_DIMENSION` env var).
///
/// ```json
/// {
///   "defaultPreset": "en",
///   "presets": {
///     "en":    { "label": "English", "uriSegment": "en" },
///     "de-at": { "label": "Deutsch (AT)", "uriSegment": "de-AT" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionConfig {
    #[serde(default)]
    pub default_preset: Option<String>,
    pub presets: HashMap<String, PresetConfig>,
}

/// One preset entry inside a [`DimensionConfig`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetConfig {
    pub uri_segment: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// A configured language variant of the site.
///
/// Selected per request by the resolver; read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePreset {
    /// Preset identifier, i.e. the dimension value it represents.
    pub identifier: String,
    /// Path segment identifying this language (e.g. "en", "de-AT").
    pub uri_segment: String,
    /// Human-readable label, if configured.
    pub label: Option<String>,
}

/// Read-only preset lookup, injected into the resolver.
pub trait PresetSource: Send + Sync {
    /// The configured default preset of a dimension, if any.
    fn default_preset(&self, dimension: &str) -> Option<LanguagePreset>;

    /// Find the preset of a dimension whose URI segment equals `segment`.
    fn find_by_uri_segment(&self, dimension: &str, segment: &str) -> Option<LanguagePreset>;
}

/// In-memory preset source built from the startup configuration.
pub struct StaticPresetSource {
    dimensions: HashMap<String, Dimension>,
}

struct Dimension {
    default_preset: Option<String>,
    presets: Vec<LanguagePreset>,
}

impl StaticPresetSource {
    /// Build a source holding a single dimension.
    ///
    /// Fails when the config is unusable: no presets at all, an empty or
    /// non-URL-safe URI segment, or a default preset that names no entry.
    /// Validating segments here means redirect construction can never
    /// produce an invalid `Location` value later.
    pub fn from_config(dimension: &str, config: &DimensionConfig) -> Result<Self> {
        if config.presets.is_empty() {
            bail!("dimension '{}' has no presets configured", dimension);
        }

        let mut presets = Vec::with_capacity(config.presets.len());
        for (identifier, preset) in &config.presets {
            if preset.uri_segment.is_empty() {
                bail!(
                    "preset '{}' of dimension '{}' has an empty uriSegment",
                    identifier,
                    dimension
                );
            }
            if !preset
                .uri_segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
            {
                bail!(
                    "preset '{}' of dimension '{}' has a non-URL-safe uriSegment '{}'",
                    identifier,
                    dimension,
                    preset.uri_segment
                );
            }
            presets.push(LanguagePreset {
                identifier: identifier.clone(),
                uri_segment: preset.uri_segment.clone(),
                label: preset.label.clone(),
            });
        }

        if let Some(default) = &config.default_preset {
            if !config.presets.contains_key(default) {
                bail!(
                    "defaultPreset '{}' of dimension '{}' is not among the presets",
                    default,
                    dimension
                );
            }
        }

        let mut dimensions = HashMap::new();
        dimensions.insert(
            dimension.to_string(),
            Dimension {
                default_preset: config.default_preset.clone(),
                presets,
            },
        );

        Ok(Self { dimensions })
    }
}

impl PresetSource for StaticPresetSource {
    fn default_preset(&self, dimension: &str) -> Option<LanguagePreset> {
        let dim = self.dimensions.get(dimension)?;
        let default = dim.default_preset.as_deref()?;
        dim.presets
            .iter()
            .find(|p| p.identifier == default)
            .cloned()
    }

    fn find_by_uri_segment(&self, dimension: &str, segment: &str) -> Option<LanguagePreset> {
        self.dimensions
            .get(dimension)?
            .presets
            .iter()
            .find(|p| p.uri_segment == segment)
            .cloned()
    }
}
