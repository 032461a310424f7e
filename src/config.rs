use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::i18n::{DimensionConfig, HeaderStrategy};

#[derive(Debug, Clone)]
pub struct Config {
    // HTTP server
    pub port: u16,

    // Language dimension presets (JSON, see DimensionConfig for the shape)
    pub language_dimension: DimensionConfig,

    // Detected language code -> canonical code used for preset lookup
    pub language_code_overrides: HashMap<String, String>,

    // Frontend language cookie; empty name disables cookie-based detection
    pub fe_language_cookie_name: String,

    // Accept-Language parsing strategy
    pub header_strategy: HeaderStrategy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            language_dimension: serde_json::from_str(
                &std::env::var("LANGUAGE_DIMENSION").context("LANGUAGE_DIMENSION not set")?,
            )
            .context("LANGUAGE_DIMENSION is not valid JSON")?,

            language_code_overrides: match std::env::var("LANGUAGE_CODE_OVERRIDES") {
                Ok(raw) => serde_json::from_str(&raw)
                    .context("LANGUAGE_CODE_OVERRIDES is not a valid JSON object")?,
                Err(_) => HashMap::new(),
            },

            fe_language_cookie_name: std::env::var("FE_LANGUAGE_COOKIE_NAME")
                .unwrap_or_default(),

            header_strategy: match std::env::var("HEADER_STRATEGY") {
                Ok(raw) => raw
                    .parse()
                    .context("HEADER_STRATEGY must be 'drop-first' or 'quality'")?,
                Err(_) => HeaderStrategy::DropFirst,
            },
        })
    }
}
