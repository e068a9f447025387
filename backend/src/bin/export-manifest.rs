//! Write a delivery manifest to disk without going through the HTTP API.
//!
//! Usage: export-manifest --date YYYY-MM-DD [--mode semaine|jour] [--output DIR]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use livraisons_api::{
    config::Config, db, models::manifest::ExportRequest, services::export::ExportService,
};

#[derive(Parser)]
#[command(name = "export-manifest", about = "Export the weekly delivery manifest as CSV")]
struct Args {
    /// Reference date (YYYY-MM-DD)
    #[arg(long)]
    date: String,

    /// semaine: whole ISO week, jour: meals eaten on the date only
    #[arg(long, default_value = "semaine")]
    mode: String,

    /// Directory the file is written to
    #[arg(long, default_value = ".")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let pool = db::create_pool(&config.database_url, 5).await?;

    let request = ExportRequest { mode: args.mode, date: args.date };
    let file = ExportService::export(&pool, &request).await?;

    let path = args.output.join(&file.file_name);
    tokio::fs::write(&path, &file.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {} delivery rows to {}", file.rows, path.display());

    Ok(())
}
