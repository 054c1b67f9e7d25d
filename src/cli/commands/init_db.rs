use anyhow::Context;
use serde_json::json;

use crate::cli::utils::{open_store, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::schema::ALL_TABLES;

pub async fn handle(config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    store
        .ensure_schema()
        .await
        .context("failed to create tables")?;

    let tables: Vec<&str> = ALL_TABLES.iter().map(|(name, _)| *name).collect();
    output_success(
        output_format,
        "Database tables created.",
        Some(json!({ "tables": tables })),
    )
}
