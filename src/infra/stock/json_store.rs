use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::fs;

use crate::core::stock::{Catalog, StockStore, StoreError};

/// JSON file store for the stock catalog. The whole catalog lives in one file
/// as a map: { name: { quantity, price } }
pub struct JsonStockStore {
    path: PathBuf,
}

impl JsonStockStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Pretty-print with four-space indentation.
fn to_pretty_json(catalog: &Catalog) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    catalog.serialize(&mut serializer)?;
    Ok(buf)
}

#[async_trait]
impl StockStore for JsonStockStore {
    async fn load(&self) -> Result<Catalog, StoreError> {
        if !self.path.exists() {
            return Ok(Catalog::new());
        }

        let bytes = fs::read(&self.path).await?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let bytes = to_pretty_json(catalog)?;
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
