// Console layer - the interactive text menu.
// Talks to the core only through StockService.

#[path = "formatter.rs"]
pub mod formatter;

#[path = "menu.rs"]
pub mod menu;

pub use menu::Console;
