use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use thiserror::Error;

/// Failures of a manifest export. Input errors are raised before any
/// database work, so a failed export never yields partial output.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Mode d'export invalide : {0} (attendu : semaine ou jour)")]
    InvalidMode(String),

    #[error("Date invalide : {0} (format attendu : AAAA-MM-JJ)")]
    MalformedDate(String),

    #[error("Erreur base de données : {0}")]
    Database(#[from] sqlx::Error),

    #[error("Erreur d'écriture du fichier : {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExportError::InvalidMode(_) | ExportError::MalformedDate(_) => StatusCode::BAD_REQUEST,
            ExportError::Database(_) | ExportError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error body in the shape every handler returns.
    pub fn to_response(&self) -> (StatusCode, Json<Value>) {
        (self.status_code(), Json(json!({ "error": self.to_string() })))
    }
}
