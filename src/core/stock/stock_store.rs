use super::stock_models::Catalog;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stock data in {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence for the whole catalog.
///
/// `load` returns an empty catalog when nothing has been saved yet and
/// `save` overwrites whatever was stored before.
#[async_trait]
pub trait StockStore: Send + Sync {
    async fn load(&self) -> Result<Catalog, StoreError>;
    async fn save(&self, catalog: &Catalog) -> Result<(), StoreError>;
}
