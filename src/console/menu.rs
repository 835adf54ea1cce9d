// Interactive menu loop.
//
// Reads one choice at a time, prompts for the arguments of that operation,
// and prints either the result or the error. Errors from the core never end
// the loop; only console IO failures do.

use super::formatter::{format_line, format_money, format_report};
use crate::core::stock::{
    parse_price, parse_quantity, StockError, StockService, StockStore, UpdateOutcome,
};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

const MENU: &str = "\n--- Stock Management System ---
1. Add item
2. View stock
3. Update quantity
4. Search item
5. Delete item
6. Exit";

pub struct Console<R, W> {
    input: Lines<R>,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: input.lines(),
            output,
        }
    }

    /// Run the menu until the user exits or input ends.
    /// The catalog is saved once more on the way out.
    pub async fn run<S: StockStore>(
        &mut self,
        service: &mut StockService<S>,
    ) -> anyhow::Result<()> {
        loop {
            self.say(MENU).await?;
            let Some(choice) = self.prompt("Choose an option (1-6): ").await? else {
                break;
            };

            match choice.as_str() {
                "1" => self.add_item(service).await?,
                "2" => self.say(&format_report(&service.report())).await?,
                "3" => self.update_quantity(service).await?,
                "4" => self.search_items(service).await?,
                "5" => self.delete_item(service).await?,
                "6" => break,
                _ => self.say("Invalid choice. Try again.").await?,
            }
        }

        service.save().await?;
        self.say("Goodbye!").await?;
        Ok(())
    }

    async fn add_item<S: StockStore>(&mut self, service: &mut StockService<S>) -> io::Result<()> {
        let Some(name) = self.prompt("Enter item name: ").await? else {
            return Ok(());
        };
        // Duplicates are rejected before prompting for numbers
        if service.get(&name).is_some() {
            return self.show(Err(StockError::DuplicateItem(name))).await;
        }
        let Some(quantity) = self.prompt("Enter quantity: ").await? else {
            return Ok(());
        };
        let Some(price) = self.prompt("Enter price per unit: ").await? else {
            return Ok(());
        };

        let outcome = async {
            let quantity = parse_quantity(&quantity)?;
            let price = parse_price(&price)?;
            service.add_item(&name, quantity, price).await?;
            Ok::<_, StockError>(format!(
                "Added {}: {} units at {} each.",
                name,
                quantity,
                format_money(price)
            ))
        }
        .await;
        self.show(outcome).await
    }

    async fn update_quantity<S: StockStore>(
        &mut self,
        service: &mut StockService<S>,
    ) -> io::Result<()> {
        let Some(name) = self.prompt("Enter item name: ").await? else {
            return Ok(());
        };
        if service.get(&name).is_none() {
            return self.show(Err(StockError::ItemNotFound(name))).await;
        }
        let Some(change) = self
            .prompt("Enter quantity change (+ to add, - to remove): ")
            .await?
        else {
            return Ok(());
        };

        let outcome = async {
            let delta = parse_quantity(&change)?;
            Ok::<_, StockError>(match service.update_quantity(&name, delta).await? {
                UpdateOutcome::Updated { new_quantity } => {
                    format!("Updated {}: new quantity = {}", name, new_quantity)
                }
                UpdateOutcome::Removed => format!("Removed {} (quantity reached zero).", name),
            })
        }
        .await;
        self.show(outcome).await
    }

    async fn search_items<S: StockStore>(&mut self, service: &StockService<S>) -> io::Result<()> {
        let Some(query) = self.prompt("Enter item name to search: ").await? else {
            return Ok(());
        };

        let hits = service.search_items(&query);
        if hits.is_empty() {
            return self.say("No matching items found.").await;
        }
        for line in &hits {
            self.say(&format_line(line)).await?;
        }
        Ok(())
    }

    async fn delete_item<S: StockStore>(
        &mut self,
        service: &mut StockService<S>,
    ) -> io::Result<()> {
        let Some(name) = self.prompt("Enter item name to delete: ").await? else {
            return Ok(());
        };

        let outcome = service
            .delete_item(&name)
            .await
            .map(|_| format!("Deleted {}.", name));
        self.show(outcome).await
    }

    async fn show(&mut self, outcome: Result<String, StockError>) -> io::Result<()> {
        match outcome {
            Ok(message) => self.say(&message).await,
            Err(err) => {
                tracing::warn!(error = %err, "Stock operation rejected");
                self.say(&err.to_string()).await
            }
        }
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    /// Print `label` and read one trimmed line. `None` means input is closed.
    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.output.write_all(label.as_bytes()).await?;
        self.output.flush().await?;
        Ok(self
            .input
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stock::ItemRecord;
    use crate::infra::stock::JsonStockStore;
    use tempfile::TempDir;

    async fn run_script(dir: &TempDir, script: &str) -> (String, StockService<JsonStockStore>) {
        let store = JsonStockStore::new(dir.path().join("stock_data.json"));
        let mut service = StockService::open(store).await.unwrap();

        let mut console = Console::new(script.as_bytes(), Vec::new());
        console.run(&mut service).await.unwrap();

        (String::from_utf8(console.output).unwrap(), service)
    }

    #[tokio::test]
    async fn test_add_view_and_exit() {
        let dir = TempDir::new().unwrap();
        let (out, service) = run_script(&dir, "1\nWidget\n10\n2\n2\n6\n").await;

        assert!(out.contains("Added Widget: 10 units at $2.00 each."));
        assert!(out.contains("Widget: 10 units @ $2.00 = $20.00"));
        assert!(out.contains("Total stock value: $20.00"));
        assert!(out.ends_with("Goodbye!\n"));
        assert_eq!(service.get("Widget"), Some(&ItemRecord::new(10, 2.0)));
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let dir = TempDir::new().unwrap();
        run_script(&dir, "1\n  Bolt  \n5\n0.1\n6\n").await;

        let (out, service) = run_script(&dir, "4\nbol\n6\n").await;

        assert!(out.contains("Bolt: 5 units @ $0.10 = $0.50"));
        assert_eq!(service.len(), 1);
    }

    #[tokio::test]
    async fn test_errors_return_to_menu() {
        let dir = TempDir::new().unwrap();
        let script = "1\nBolt\n5\n0.1\n\
                      1\nBolt\n\
                      1\nNut\nmany\n1.0\n\
                      3\nScrew\n\
                      5\nScrew\n\
                      9\n\
                      6\n";
        let (out, service) = run_script(&dir, script).await;

        assert!(out.contains("Item 'Bolt' already exists"));
        assert!(out.contains("Invalid input: quantity must be an integer, got 'many'"));
        assert!(out.contains("Item 'Screw' not found"));
        assert!(out.contains("Invalid choice. Try again."));
        assert_eq!(service.len(), 1);
        assert_eq!(service.get("Bolt").unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn test_update_to_zero_and_delete() {
        let dir = TempDir::new().unwrap();
        let script = "1\nWidget\n10\n2.0\n\
                      3\nWidget\n-10\n\
                      1\nGear\n3\n1.5\n\
                      3\nGear\n+2\n\
                      5\nGear\n\
                      2\n6\n";
        let (out, service) = run_script(&dir, script).await;

        assert!(out.contains("Removed Widget (quantity reached zero)."));
        assert!(out.contains("Updated Gear: new quantity = 5"));
        assert!(out.contains("Deleted Gear."));
        assert!(out.contains("No items in stock."));
        assert!(service.is_empty());
    }

    #[tokio::test]
    async fn test_end_of_input_saves_and_exits() {
        let dir = TempDir::new().unwrap();
        let (out, _) = run_script(&dir, "1\nWidget\n").await;

        assert!(out.ends_with("Goodbye!\n"));
        assert!(dir.path().join("stock_data.json").exists());
    }
}
