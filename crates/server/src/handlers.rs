//! # API Route Handlers

use crate::{
    errors::AppError,
    state::AppState,
    types::{CheckArtistRequest, CheckArtistResponse, DebugParams},
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use fakeartist::CheckError;
use serde_json::json;
use tracing::info;

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "fakeartist server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for `POST /api/check-artist`.
///
/// Runs the full artist check. With `?debug=true` the aggregated record and the
/// raw score are attached under `debug`.
pub async fn check_artist_handler(
    State(app_state): State<AppState>,
    debug_params: Result<Query<DebugParams>, QueryRejection>,
    payload: Result<Json<CheckArtistRequest>, JsonRejection>,
) -> Result<Json<CheckArtistResponse>, AppError> {
    let Query(debug_params) =
        debug_params.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let artist_name = request.artist_name.ok_or(CheckError::InvalidInput)?;
    info!("Received check-artist request for '{}'", artist_name);

    let outcome = app_state.checker.check_detailed(&artist_name).await?;

    let debug = if debug_params.debug.unwrap_or(false) {
        Some(json!({
            "record": outcome.record,
            "score": outcome.score,
        }))
    } else {
        None
    };

    Ok(Json(CheckArtistResponse {
        report: outcome.report,
        debug,
    }))
}
