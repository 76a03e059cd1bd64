// easylabel-seed - load a dataset into the store.
//
// Usage: easylabel-seed <records.json> [metadata.json]
//
// <records.json> holds a JSON array of record objects (each should
// carry an integer `index` field); [metadata.json] holds the single
// descriptive document for the dataset. The HTTP service itself never
// creates records; this binary is the seeding step that normally
// happens outside it.

use anyhow::{bail, Context};
use serde_json::Value;
use tracing::info;

use easylabel_core::Database;
use easylabel_server::Config;

fn read_json(path: &str) -> anyhow::Result<Value> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let (records_path, metadata_path) = match args.as_slice() {
        [_, records] => (records.as_str(), None),
        [_, records, metadata] => (records.as_str(), Some(metadata.as_str())),
        _ => bail!("usage: easylabel-seed <records.json> [metadata.json]"),
    };

    let config = Config::load().context("failed to load configuration")?;
    let db = Database::open(&config.data_dir)
        .with_context(|| format!("failed to open store at {}", config.data_dir.display()))?;

    let records = match read_json(records_path)? {
        Value::Array(records) => records,
        _ => bail!("{} must contain a JSON array of records", records_path),
    };

    let data = db.collection(&config.data_collection)?;
    let mut inserted = 0usize;
    for record in records {
        match record {
            Value::Object(fields) => {
                data.insert_one(fields)?;
                inserted += 1;
            }
            other => bail!("record is not an object: {}", other),
        }
    }
    info!(collection = %config.data_collection, inserted, "records seeded");

    if let Some(path) = metadata_path {
        let metadata = match read_json(path)? {
            Value::Object(fields) => fields,
            _ => bail!("{} must contain a JSON object", path),
        };
        let coll = db.collection(&config.metadata_collection)?;
        if !coll.is_empty() {
            bail!("metadata collection already holds a document");
        }
        coll.insert_one(metadata)?;
        info!(collection = %config.metadata_collection, "metadata seeded");
    }

    Ok(())
}
