use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    app::AppState,
    models::order::SaveWeekOrdersRequest,
    services::{metrics::WEEK_ORDERS_SAVED_COUNTER, orders::OrderService},
};

/// GET /api/orders/week/{week}/{year}
pub async fn get_week(
    State(state): State<AppState>,
    Path((week, year)): Path<(i32, i32)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    OrderService::list_week(&state.db, week, year)
        .await
        .map(|orders| Json(json!(orders)))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })
}

/// POST /api/orders — replaces every order of the week
pub async fn save_week(
    State(state): State<AppState>,
    Json(body): Json<SaveWeekOrdersRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    body.validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))))?;

    let saved = OrderService::replace_week(&state.db, &body)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        })?;

    WEEK_ORDERS_SAVED_COUNTER.inc_by(saved as f64);
    tracing::info!("Week {}/{}: {} orders saved", body.week, body.year, saved);
    Ok(Json(json!({ "success": true, "saved": saved })))
}
