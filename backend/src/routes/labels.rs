use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    app::AppState,
    models::regime::CreateLabelRequest,
    services::labels::{CreateLabel, LabelService},
};

fn internal(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}

fn created(outcome: CreateLabel, name: &str) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    match outcome {
        CreateLabel::Created(id) => Ok((StatusCode::CREATED, Json(json!({ "id": id, "name": name })))),
        CreateLabel::Duplicate => Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": format!("« {name} » existe déjà") })),
        )),
    }
}

fn deleted(outcome: anyhow::Result<bool>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match outcome {
        Ok(true) => Ok(Json(json!({ "message": "Supprimé" }))),
        Ok(false) => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "Introuvable" })))),
        Err(e) => Err(internal(e)),
    }
}

fn name_of(body: &CreateLabelRequest) -> Result<&str, (StatusCode, Json<Value>)> {
    body.normalized_name()
        .map_err(|msg| (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))))
}

pub async fn list_regimes(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    LabelService::list_regimes(&state.db)
        .await
        .map(|r| Json(json!(r)))
        .map_err(internal)
}

pub async fn create_regime(
    State(state): State<AppState>,
    Json(body): Json<CreateLabelRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let name = name_of(&body)?;
    let outcome = LabelService::create_regime(&state.db, name)
        .await
        .map_err(internal)?;
    created(outcome, name)
}

pub async fn delete_regime(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    deleted(LabelService::delete_regime(&state.db, id).await)
}

pub async fn list_menus(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    LabelService::list_menus(&state.db)
        .await
        .map(|m| Json(json!(m)))
        .map_err(internal)
}

pub async fn create_menu(
    State(state): State<AppState>,
    Json(body): Json<CreateLabelRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let name = name_of(&body)?;
    let outcome = LabelService::create_menu(&state.db, name)
        .await
        .map_err(internal)?;
    created(outcome, name)
}

pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    deleted(LabelService::delete_menu(&state.db, id).await)
}
