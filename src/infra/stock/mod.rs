// Stock infrastructure - file storage implementation

mod json_store;

pub use json_store::JsonStockStore;
