pub mod stock_models;
pub mod stock_service;
pub mod stock_store;

pub use stock_models::{Catalog, ItemRecord, StockLine, StockReport, UpdateOutcome};
pub use stock_service::{parse_price, parse_quantity, StockError, StockService};
pub use stock_store::{StockStore, StoreError};
