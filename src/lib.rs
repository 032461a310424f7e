//! Language-detection redirect for the site homepage.
//!
//! On an unprefixed root-page GET request, the service determines the
//! visitor's preferred language from (in priority order) a frontend language
//! cookie, the `Accept-Language` header, and finally a configured default,
//! then issues a 307 redirect to the language-prefixed homepage
//! (`/` + the matching preset's URI segment). Every other request is passed
//! through untouched.

pub mod config;
pub mod i18n;
pub mod redirect;
