use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use language_redirect::config::Config;
use language_redirect::i18n::{
    LocaleDetector, PresetResolver, PresetSource, StaticPresetSource, LANGUAGE_DIMENSION,
};
use language_redirect::redirect::{self, RedirectState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_redirect=info".parse()?),
        )
        .init();

    info!("Starting language redirect service");

    // Load configuration from environment
    let config = Config::from_env()?;

    let presets: Arc<dyn PresetSource> = Arc::new(StaticPresetSource::from_config(
        LANGUAGE_DIMENSION,
        &config.language_dimension,
    )?);

    let resolver = Arc::new(PresetResolver::new(
        LocaleDetector::new(),
        Arc::clone(&presets),
        config.language_code_overrides.clone(),
        config.header_strategy,
    ));

    let state = RedirectState {
        resolver,
        cookie_name: config.fe_language_cookie_name.clone(),
    };

    let app = Router::new()
        .route("/:lang", get(homepage))
        .with_state(Arc::clone(&presets))
        .layer(middleware::from_fn_with_state(
            state,
            redirect::language_redirect,
        ))
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Minimal per-language homepage so the redirect target is observable.
/// Unknown segments get a 404.
async fn homepage(
    State(presets): State<Arc<dyn PresetSource>>,
    Path(lang): Path<String>,
) -> impl IntoResponse {
    match presets.find_by_uri_segment(LANGUAGE_DIMENSION, &lang) {
        Some(preset) => {
            let label = preset.label.unwrap_or_else(|| preset.identifier.clone());
            (StatusCode::OK, format!("{} homepage\n", label)).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
