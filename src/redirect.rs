//! HTTP adapter: the redirect middleware around the language resolver.
//!
//! Gates requests (GET on the site root only), feeds the cookie and
//! `Accept-Language` values into the resolver, and answers with a 307 to the
//! language-prefixed homepage. Everything else is delegated to the inner
//! service unchanged.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, error, info};

use crate::i18n::{LanguagePreset, PresetResolver};

/// Characters trimmed from the path before the root check: ASCII whitespace
/// (including NUL and vertical tab) and slashes.
const PATH_TRIM: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B', '/'];

/// Shared middleware state; read-only for the process lifetime.
#[derive(Clone)]
pub struct RedirectState {
    pub resolver: Arc<PresetResolver>,
    /// Frontend language cookie name; empty disables cookie detection.
    pub cookie_name: String,
}

/// Whether a request qualifies for redirect handling.
///
/// Only GET requests to the site root (path empty after trimming whitespace
/// and slashes) are handled. Pure predicate, no side effects.
pub fn should_handle(method: &Method, path: &str) -> bool {
    if method != Method::GET {
        return false;
    }
    path.trim_matches(PATH_TRIM).is_empty()
}

/// Build the 307 redirect to the preset's homepage.
///
/// The original URI keeps its scheme, authority and query string; only the
/// path is replaced by `/` + the preset's URI segment. Segments are validated
/// as URL-safe when the preset source is built, so the `Location` value is
/// always a valid header value.
pub fn build_redirect(uri: &Uri, preset: &LanguagePreset) -> Response {
    let mut location = String::new();
    if let Some(scheme) = uri.scheme_str() {
        location.push_str(scheme);
        location.push_str("://");
    }
    if let Some(authority) = uri.authority() {
        location.push_str(authority.as_str());
    }
    location.push('/');
    location.push_str(&preset.uri_segment);
    if let Some(query) = uri.query() {
        location.push('?');
        location.push_str(query);
    }

    Redirect::temporary(&location).into_response()
}

/// Extract a cookie value from the `Cookie` request header.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// The axum middleware: layer this around the router.
pub async fn language_redirect(
    State(state): State<RedirectState>,
    request: Request,
    next: Next,
) -> Response {
    if !should_handle(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    let cookie = if state.cookie_name.is_empty() {
        None
    } else {
        cookie_value(request.headers(), &state.cookie_name)
    };

    // First value only if the header is repeated; non-UTF-8 counts as absent.
    let accept_language = request
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    match state.resolver.resolve(cookie.as_deref(), accept_language) {
        Ok(preset) => {
            info!(
                segment = %preset.uri_segment,
                from_cookie = cookie.is_some(),
                "redirecting root request to language homepage"
            );
            debug!(uri = %request.uri(), "redirect source request");
            build_redirect(request.uri(), &preset)
        }
        Err(e) => {
            error!("language redirect failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
