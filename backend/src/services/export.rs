use sqlx::PgPool;
use tracing::info;

use crate::{
    error::ExportError,
    models::manifest::{ExportMode, ExportRequest},
    services::{
        configuration::ConfigurationService,
        delivery::{DeliveryResolver, IsoWeekRef},
        manifest::ManifestBuilder,
        metrics::{MANIFEST_EXPORTS_COUNTER, MANIFEST_ROWS_COUNTER},
        orders::OrderService,
    },
};

/// A rendered manifest, ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ManifestFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

pub struct ExportService;

impl ExportService {
    pub async fn export(pool: &PgPool, req: &ExportRequest) -> Result<ManifestFile, ExportError> {
        let outcome = Self::run(pool, req).await;
        let mode = ExportMode::parse(&req.mode).map_or("invalide", ExportMode::as_str);
        match &outcome {
            Ok(file) => {
                MANIFEST_EXPORTS_COUNTER.with_label_values(&[mode, "ok"]).inc();
                MANIFEST_ROWS_COUNTER.inc_by(file.rows as f64);
            }
            Err(e) => {
                MANIFEST_EXPORTS_COUNTER.with_label_values(&[mode, "error"]).inc();
                tracing::warn!("Manifest export failed: {}", e);
            }
        }
        outcome
    }

    async fn run(pool: &PgPool, req: &ExportRequest) -> Result<ManifestFile, ExportError> {
        let (reference_date, mode) = req.parse()?;
        let week = IsoWeekRef::of(reference_date);

        // Both reads see the same snapshot, even if the week's orders are
        // being replaced concurrently.
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        let mapping = ConfigurationService::load_mapping(&mut *tx).await?;
        let orders = OrderService::fetch_for_export(&mut *tx, week).await?;
        tx.commit().await?;

        let rows = DeliveryResolver::resolve(reference_date, mode, &mapping, &orders);
        let bytes = ManifestBuilder::render(&rows)?;

        info!(
            "Manifest {} for {} (week {}/{}): {} orders, {} rows",
            mode.as_str(),
            reference_date,
            week.week,
            week.year,
            orders.len(),
            rows.len()
        );

        Ok(ManifestFile {
            file_name: ManifestBuilder::file_name(reference_date),
            bytes,
            rows: rows.len(),
        })
    }
}
