use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    app::AppState,
    models::delivery::DeliveryConfigEntry,
    services::configuration::{check_unique_days, ConfigurationService},
};

/// GET /api/configuration — effective mapping, one entry per weekday
pub async fn get_configuration(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ConfigurationService::load_mapping(&state.db)
        .await
        .map(|mapping| Json(json!(mapping.entries().collect::<Vec<_>>())))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

/// POST /api/configuration — replaces the stored mapping
pub async fn save_configuration(
    State(state): State<AppState>,
    Json(body): Json<Vec<DeliveryConfigEntry>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    check_unique_days(&body)
        .map_err(|msg| (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))))?;

    ConfigurationService::replace(&state.db, &body)
        .await
        .map(|_| {
            tracing::info!("Delivery configuration replaced ({} entries)", body.len());
            Json(json!({ "success": true }))
        })
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}
