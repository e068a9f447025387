use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{config::Config, routes};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

/// Allow the configured frontend origin, plus localhost for development.
fn cors_layer(base_url: String) -> CorsLayer {
    let origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") || o == base_url
    });

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_origin(origin)
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config.app_base_url.clone());

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Beneficiaries
        .route(
            "/api/beneficiaries",
            get(routes::beneficiaries::list_beneficiaries).post(routes::beneficiaries::create_beneficiary),
        )
        .route(
            "/api/beneficiaries/{id}",
            put(routes::beneficiaries::update_beneficiary).delete(routes::beneficiaries::delete_beneficiary),
        )
        // Regimes & menus
        .route("/api/regimes", get(routes::labels::list_regimes).post(routes::labels::create_regime))
        .route("/api/regimes/{id}", delete(routes::labels::delete_regime))
        .route("/api/menus", get(routes::labels::list_menus).post(routes::labels::create_menu))
        .route("/api/menus/{id}", delete(routes::labels::delete_menu))
        // Delivery configuration
        .route(
            "/api/configuration",
            get(routes::configuration::get_configuration).post(routes::configuration::save_configuration),
        )
        // Weekly orders
        .route("/api/orders", post(routes::orders::save_week))
        .route("/api/orders/week/{week}/{year}", get(routes::orders::get_week))
        // Manifest export
        .route("/api/export/csv", post(routes::export::export_csv))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
