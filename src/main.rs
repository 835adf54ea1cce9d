// This is the entry point of the stock manager.
//
// **Architecture Overview:**
// - `core/` = Business logic (catalog rules, storage trait)
// - `infra/` = Implementations of core traits (JSON file store)
// - `console/` = The interactive text menu
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Hand stdin/stdout to the console loop

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "console/console_layer.rs"]
mod console;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::console::Console;
use crate::core::stock::StockService;
use crate::infra::stock::JsonStockStore;
use anyhow::Context;

const DEFAULT_DATA_FILE: &str = "stock_data.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the menu on stdout
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let data_file =
        std::env::var("STOCK_DATA_FILE").unwrap_or_else(|_| DEFAULT_DATA_FILE.to_string());

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let store = JsonStockStore::new(&data_file);
    tracing::info!(path = %store.path().display(), "Opening stock data");

    let mut service = match StockService::open(store).await {
        Ok(service) => service,
        Err(err) => {
            if err.is_corrupt_data() {
                tracing::error!("Stock data file is not a valid catalog; fix or move it aside");
            }
            return Err(err)
                .with_context(|| format!("Failed to load stock data from {}", data_file));
        }
    };
    tracing::info!(items = service.len(), "Stock catalog ready");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut console = Console::new(stdin, tokio::io::stdout());
    console.run(&mut service).await?;

    tracing::info!(items = service.len(), "Stock manager shutting down");
    Ok(())
}
