use anyhow::Context;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::cli::OutputFormat;
use crate::config::{AppConfig, StoreBackend};
use crate::database::{MemoryStore, PgStore, Store};

/// Build the persistence gateway the configuration asks for
pub async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn Store>> {
    match config.store_backend()? {
        StoreBackend::Memory => {
            info!("Using in-memory store ({:?})", config.environment);
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres(url) => {
            let store = PgStore::connect(&url, &config.database)
                .await
                .context("failed to connect to database")?;
            Ok(Arc::new(store))
        }
    }
}

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({ "message": message });
            if let (Some(Value::Object(extra)), Some(obj)) = (data, response.as_object_mut()) {
                obj.extend(extra);
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}
