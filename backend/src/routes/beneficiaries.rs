use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    app::AppState,
    models::beneficiary::UpsertBeneficiaryRequest,
    services::beneficiaries::BeneficiaryService,
};

fn internal(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Bénéficiaire introuvable" })))
}

fn check(body: &UpsertBeneficiaryRequest) -> Result<(), (StatusCode, Json<Value>)> {
    body.validate()
        .map_err(|msg| (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))))
}

/// GET /api/beneficiaries — active beneficiaries only
pub async fn list_beneficiaries(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    BeneficiaryService::list_active(&state.db)
        .await
        .map(|b| Json(json!(b)))
        .map_err(internal)
}

pub async fn create_beneficiary(
    State(state): State<AppState>,
    Json(body): Json<UpsertBeneficiaryRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    check(&body)?;

    let id = BeneficiaryService::create(&state.db, &body)
        .await
        .map_err(internal)?;
    tracing::info!("Beneficiary {} created", id);

    let beneficiary = BeneficiaryService::get(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or_else(not_found)?;
    Ok((StatusCode::CREATED, Json(json!(beneficiary))))
}

pub async fn update_beneficiary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpsertBeneficiaryRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    check(&body)?;

    if !BeneficiaryService::update(&state.db, id, &body)
        .await
        .map_err(internal)?
    {
        return Err(not_found());
    }

    BeneficiaryService::get(&state.db, id)
        .await
        .map_err(internal)?
        .map(|b| Json(json!(b)))
        .ok_or_else(not_found)
}

/// DELETE /api/beneficiaries/{id} — deactivates, orders are kept
pub async fn delete_beneficiary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match BeneficiaryService::deactivate(&state.db, id).await {
        Ok(true) => Ok(Json(json!({ "message": "Bénéficiaire désactivé" }))),
        Ok(false) => Err(not_found()),
        Err(e) => Err(internal(e)),
    }
}
