use anyhow::Context;
use axum::{Router, http::HeaderValue};
use cuaca_core::Config;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};

/// The full application: routes, CORS and request tracing.
pub fn app(config: &Config, state: AppState) -> Router {
    api::router(state)
        .layer(cors(&config.server.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: &Config, state: AppState) -> anyhow::Result<()> {
    let app = app(config, state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{addr}");

    axum::serve(listener, app).await.context("HTTP server terminated")?;
    Ok(())
}

/// Credentials are allowed, so methods and headers mirror the request
/// instead of using a wildcard.
fn cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
