//! Internationalization (i18n) module: language negotiation for the redirect.
//!
//! All language-related logic lives here: locale detection, the content
//! dimension presets, and the resolver that picks one preset per request.
//!
//! # Architecture
//!
//! - `locale`: locale detection from cookie tags and `Accept-Language` strings
//! - `presets`: the configured language variants and their lookup
//! - `resolver`: the cookie -> header -> default priority chain
//!
//! # Example
//!
//! ```rust,ignore
//! use language_redirect::i18n::{
//!     HeaderStrategy, LocaleDetector, PresetResolver, StaticPresetSource, LANGUAGE_DIMENSION,
//! };
//!
//! let source = Arc::new(StaticPresetSource::from_config(LANGUAGE_DIMENSION, &dimension)?);
//! let resolver = PresetResolver::new(
//!     LocaleDetector::new(),
//!     source,
//!     overrides,
//!     HeaderStrategy::DropFirst,
//! );
//! let preset = resolver.resolve(cookie.as_deref(), accept_language)?;
//! ```

mod locale;
mod presets;
mod resolver;

pub use locale::{Locale, LocaleDetector};
pub use presets::{
    DimensionConfig, LanguagePreset, PresetConfig, PresetSource, StaticPresetSource,
    LANGUAGE_DIMENSION,
};
pub use resolver::{HeaderStrategy, PresetResolver, ResolveError, UnknownStrategy};
