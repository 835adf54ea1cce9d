// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "stock/mod.rs"]
pub mod stock;
