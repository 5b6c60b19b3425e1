use super::models::{ConvertRequest, HealthResponse};
use super::AppState;
use crate::errors::ApiError;
use crate::models::{self, ConversionRecord};
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;

/// GET /health — liveness check with the server's current time
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: models::to_iso8601(&Utc::now()),
    })
}

/// POST /api/convert — validate, convert, and record in history
pub async fn convert(
    State(state): State<AppState>,
    request: ConvertRequest,
) -> Result<(StatusCode, Json<ConversionRecord>), ApiError> {
    let valid = request.validate()?;
    let record = state.history.record(valid.from, valid.to, valid.score)?;

    metrics::counter!(
        "score_conversions_total",
        "from" => valid.from.code(),
        "to" => valid.to.code()
    )
    .increment(1);
    metrics::gauge!("score_history_len").set(state.history.len()? as f64);

    tracing::info!(
        id = %record.id,
        from = %record.country_from,
        to = %record.country_to,
        original = record.original_score,
        converted = record.converted_score,
        "score converted"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/history — stored conversions, most recent first
pub async fn history(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConversionRecord>>, ApiError> {
    Ok(Json(state.history.recent()?))
}

/// Any unmatched route or method
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
