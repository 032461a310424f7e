//! Integration tests for the language redirect service
//!
//! These tests drive a full axum router (redirect middleware + homepage
//! routes) in process via `tower::ServiceExt::oneshot` and verify the
//! end-to-end redirect behavior.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceExt;

use language_redirect::i18n::{
    DimensionConfig, HeaderStrategy, LocaleDetector, PresetResolver, PresetSource,
    StaticPresetSource, LANGUAGE_DIMENSION,
};
use language_redirect::redirect::{self, RedirectState};

// ==================== Test Helpers ====================

const EN_DE_DIMENSION: &str = r#"{
    "defaultPreset": "en",
    "presets": {
        "en": { "label": "English", "uriSegment": "en" },
        "de": { "label": "Deutsch", "uriSegment": "de" }
    }
}"#;

/// Build the app the same way `main` does, from a dimension JSON string.
fn build_app(
    dimension_json: &str,
    overrides: &[(&str, &str)],
    cookie_name: &str,
    strategy: HeaderStrategy,
) -> Router {
    let dimension: DimensionConfig =
        serde_json::from_str(dimension_json).expect("test dimension should parse");
    let presets: Arc<dyn PresetSource> = Arc::new(
        StaticPresetSource::from_config(LANGUAGE_DIMENSION, &dimension)
            .expect("preset source should build"),
    );

    let overrides: HashMap<String, String> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let resolver = Arc::new(PresetResolver::new(
        LocaleDetector::new(),
        Arc::clone(&presets),
        overrides,
        strategy,
    ));

    let state = RedirectState {
        resolver,
        cookie_name: cookie_name.to_string(),
    };

    Router::new()
        .route("/:lang", get(|| async { "homepage" }))
        .layer(middleware::from_fn_with_state(
            state,
            redirect::language_redirect,
        ))
}

fn location(response: &axum::response::Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

// ==================== Redirect Flow Tests ====================

#[tokio::test]
async fn test_root_get_redirects_by_header() {
    let app = build_app(EN_DE_DIMENSION, &[], "", HeaderStrategy::DropFirst);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ACCEPT_LANGUAGE, "de,en;q=0.8")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/de"));
}

#[tokio::test]
async fn test_redirect_preserves_query() {
    let app = build_app(EN_DE_DIMENSION, &[], "", HeaderStrategy::DropFirst);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?foo=bar")
                .header(header::ACCEPT_LANGUAGE, "de")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/de?foo=bar"));
}

#[tokio::test]
async fn test_header_fallthrough_to_later_tag() {
    // Only "de" is configured: the undetectable "*" and the unmatched "en"
    // are dropped one part at a time.
    let dimension = r#"{"presets": {"de": { "uriSegment": "de" }}}"#;
    let app = build_app(dimension, &[], "", HeaderStrategy::DropFirst);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ACCEPT_LANGUAGE, "*,en;q=0.9,de;q=0.8")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/de"));
}

#[tokio::test]
async fn test_no_header_falls_back_to_default() {
    let app = build_app(EN_DE_DIMENSION, &[], "", HeaderStrategy::DropFirst);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/en"));
}

// ==================== Cookie Priority Tests ====================

#[tokio::test]
async fn test_cookie_wins_over_header() {
    let app = build_app(EN_DE_DIMENSION, &[], "fe_language", HeaderStrategy::DropFirst);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, "session=abc; fe_language=en")
                .header(header::ACCEPT_LANGUAGE, "de")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/en"));
}

#[tokio::test]
async fn test_cookie_override_maps_language_code() {
    let dimension = r#"{"presets": {"de-at": { "uriSegment": "de-AT" }}}"#;
    let app = build_app(
        dimension,
        &[("de", "de-AT")],
        "fe_language",
        HeaderStrategy::DropFirst,
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, "fe_language=de")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/de-AT"));
}

#[tokio::test]
async fn test_empty_cookie_name_disables_cookie_detection() {
    let app = build_app(EN_DE_DIMENSION, &[], "", HeaderStrategy::DropFirst);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, "fe_language=en")
                .header(header::ACCEPT_LANGUAGE, "de")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The cookie is present but detection by cookie is disabled.
    assert_eq!(location(&response), Some("/de"));
}

// ==================== Pass-Through Tests ====================

#[tokio::test]
async fn test_post_passes_through() {
    let app = build_app(EN_DE_DIMENSION, &[], "", HeaderStrategy::DropFirst);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::ACCEPT_LANGUAGE, "de")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // No redirect; the router has no POST route for "/".
    assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn test_prefixed_path_passes_through_no_loop() {
    let app = build_app(EN_DE_DIMENSION, &[], "", HeaderStrategy::DropFirst);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/en")
                .header(header::ACCEPT_LANGUAGE, "de")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Already-redirected requests reach the homepage route untouched.
    assert_eq!(response.status(), StatusCode::OK);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn test_deep_path_passes_through() {
    let app = build_app(EN_DE_DIMENSION, &[], "", HeaderStrategy::DropFirst);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/en/about")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(location(&response).is_none());
}

// ==================== Configuration Error Tests ====================

#[tokio::test]
async fn test_no_match_and_no_default_is_server_error() {
    let dimension = r#"{"presets": {"de": { "uriSegment": "de" }}}"#;
    let app = build_app(dimension, &[], "", HeaderStrategy::DropFirst);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ACCEPT_LANGUAGE, "fr,it;q=0.5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ==================== Strategy Tests ====================

#[tokio::test]
async fn test_quality_strategy_honors_weights() {
    let app = build_app(EN_DE_DIMENSION, &[], "", HeaderStrategy::Quality);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ACCEPT_LANGUAGE, "en;q=0.4,de;q=0.9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(location(&response), Some("/de"));
}

#[tokio::test]
async fn test_drop_first_strategy_honors_listed_order() {
    let app = build_app(EN_DE_DIMENSION, &[], "", HeaderStrategy::DropFirst);

    // Same header as the quality test; listed order wins here.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ACCEPT_LANGUAGE, "en;q=0.4,de;q=0.9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(location(&response), Some("/en"));
}
