use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use cuaca_core::{
    ForecastResponse, ProviderError, RegionDirectory, WeatherProvider, assemble_from_upstream,
    region::{City, District, Province, Village},
};

/// Shared, read-only state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
    pub regions: Arc<RegionDirectory>,
    /// Village code sent upstream on every forecast request.
    pub adm4: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(prakiraan_cuaca))
        .route("/provinces", get(list_provinces))
        .route("/cities/byparentid/{parent_id}", get(list_cities_by_parent_id))
        .route("/districts/byparentid/{parent_id}", get(list_districts_by_parent_id))
        .route("/villages/byparentid/{parent_id}", get(list_villages_by_parent_id))
        .with_state(state)
}

/// Upstream failure, rendered as a plain-text message.
#[derive(Debug)]
pub struct UpstreamFailure(ProviderError);

impl IntoResponse for UpstreamFailure {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_GATEWAY,
            format!("ERROR: Gagal mengambil data. ({})", self.0),
        )
            .into_response()
    }
}

async fn prakiraan_cuaca(
    State(state): State<AppState>,
) -> Result<Json<ForecastResponse>, UpstreamFailure> {
    let raw = state
        .provider
        .fetch_forecast(&state.adm4)
        .await
        .map_err(|err| {
            tracing::error!(adm4 = %state.adm4, "forecast fetch failed: {err}");
            UpstreamFailure(err)
        })?;

    Ok(Json(assemble_from_upstream(&raw)))
}

async fn list_provinces(State(state): State<AppState>) -> Json<Vec<Province>> {
    Json(state.regions.provinces())
}

async fn list_cities_by_parent_id(
    State(state): State<AppState>,
    Path(parent_id): Path<i64>,
) -> Json<Vec<City>> {
    Json(state.regions.cities_by_parent(parent_id))
}

async fn list_districts_by_parent_id(
    State(state): State<AppState>,
    Path(parent_id): Path<i64>,
) -> Json<Vec<District>> {
    Json(state.regions.districts_by_parent(parent_id))
}

async fn list_villages_by_parent_id(
    State(state): State<AppState>,
    Path(parent_id): Path<i64>,
) -> Json<Vec<Village>> {
    Json(state.regions.villages_by_parent(parent_id))
}
