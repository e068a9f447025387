use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde_json::Value;

use crate::{
    app::AppState,
    models::manifest::ExportRequest,
    services::export::{ExportService, ManifestFile},
};

/// POST /api/export/csv — body `{ "mode": "semaine" | "jour", "date": "YYYY-MM-DD" }`
pub async fn export_csv(
    State(state): State<AppState>,
    Json(body): Json<ExportRequest>,
) -> Result<Response<Body>, (StatusCode, Json<Value>)> {
    let file = ExportService::export(&state.db, &body)
        .await
        .map_err(|e| e.to_response())?;

    manifest_response(file)
}

/// Send a rendered manifest as a CSV attachment.
pub fn manifest_response(file: ManifestFile) -> Result<Response<Body>, (StatusCode, Json<Value>)> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime::TEXT_CSV.as_ref())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        )
        .body(Body::from(file.bytes))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use http_body_util::BodyExt;

    use crate::services::manifest::ManifestBuilder;

    #[tokio::test]
    async fn manifest_is_sent_as_csv_attachment() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let bytes = ManifestBuilder::render(&[]).unwrap();
        let file = ManifestFile {
            file_name: ManifestBuilder::file_name(date),
            bytes: bytes.clone(),
            rows: 0,
        };

        let response = manifest_response(file).unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"livraisons_2024-03-04.csv\""
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), bytes.as_slice());
        assert!(body.starts_with("Action;Date de début souhaitée;".as_bytes()));
    }
}
