// Stock tracking core - business logic for the inventory catalog
//
// The service owns the in-memory catalog and the store it was loaded from.
// Every mutation builds the next catalog, persists it, and only then swaps it
// in, so a failed save never leaves a half-applied change behind.

use super::stock_models::{self, Catalog, ItemRecord, StockLine, StockReport, UpdateOutcome};
use super::stock_store::{StockStore, StoreError};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Item '{0}' already exists. Use update to change its quantity.")]
    DuplicateItem(String),
    #[error("Item '{0}' not found")]
    ItemNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StockError {
    /// True when the persisted data could not be read back as a catalog.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, StockError::Store(StoreError::Corrupt { .. }))
    }
}

// ============================================================================
// INPUT PARSING
// ============================================================================

/// Parse a whole-number quantity or quantity change.
pub fn parse_quantity(input: &str) -> Result<i64, StockError> {
    let trimmed = input.trim();
    trimmed.parse::<i64>().map_err(|_| {
        StockError::InvalidInput(format!("quantity must be an integer, got '{}'", trimmed))
    })
}

/// Parse a unit price. NaN and infinities are rejected.
pub fn parse_price(input: &str) -> Result<f64, StockError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(StockError::InvalidInput(format!(
            "price must be a number, got '{}'",
            trimmed
        ))),
    }
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct StockService<S: StockStore> {
    store: S,
    catalog: Catalog,
}

impl<S: StockStore> StockService<S> {
    /// Load the persisted catalog (empty if nothing was saved yet).
    pub async fn open(store: S) -> Result<Self, StockError> {
        let catalog = store.load().await?;
        tracing::debug!(items = catalog.len(), "Stock catalog loaded");
        Ok(Self { store, catalog })
    }

    #[cfg(test)]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn get(&self, name: &str) -> Option<&ItemRecord> {
        self.catalog.get(name)
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Add a new item. Existing names must go through `update_quantity`.
    ///
    /// Quantity is not required to be positive here.
    pub async fn add_item(
        &mut self,
        name: &str,
        quantity: i64,
        unit_price: f64,
    ) -> Result<(), StockError> {
        if name.trim().is_empty() {
            return Err(StockError::InvalidInput(
                "item name must not be empty".to_string(),
            ));
        }
        if !unit_price.is_finite() {
            return Err(StockError::InvalidInput(format!(
                "price must be a number, got '{}'",
                unit_price
            )));
        }
        if self.catalog.contains_key(name) {
            tracing::warn!(item = name, "Rejected duplicate item");
            return Err(StockError::DuplicateItem(name.to_string()));
        }

        let mut next = self.catalog.clone();
        next.insert(name.to_string(), ItemRecord::new(quantity, unit_price));
        self.commit(next).await?;

        tracing::debug!(item = name, quantity, unit_price, "Item added");
        Ok(())
    }

    /// Apply a signed change to an item's quantity.
    ///
    /// An item whose quantity drops to zero or below is removed.
    pub async fn update_quantity(
        &mut self,
        name: &str,
        delta: i64,
    ) -> Result<UpdateOutcome, StockError> {
        let existing = self
            .catalog
            .get(name)
            .ok_or_else(|| StockError::ItemNotFound(name.to_string()))?;

        let new_quantity = existing.quantity.checked_add(delta).ok_or_else(|| {
            StockError::InvalidInput(format!("quantity change {} is out of range", delta))
        })?;

        let mut next = self.catalog.clone();
        let outcome = if new_quantity <= 0 {
            next.remove(name);
            UpdateOutcome::Removed
        } else {
            if let Some(record) = next.get_mut(name) {
                record.quantity = new_quantity;
            }
            UpdateOutcome::Updated { new_quantity }
        };
        self.commit(next).await?;

        tracing::debug!(item = name, delta, new_quantity, "Quantity updated");
        Ok(outcome)
    }

    /// Case-insensitive substring search over item names.
    /// An empty query matches everything.
    pub fn search_items(&self, query: &str) -> Vec<StockLine> {
        let needle = query.to_lowercase();
        self.catalog
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains(&needle))
            .map(|(name, record)| StockLine::from_record(name, record))
            .collect()
    }

    /// Remove an item entirely, returning the record it had.
    pub async fn delete_item(&mut self, name: &str) -> Result<ItemRecord, StockError> {
        let mut next = self.catalog.clone();
        let removed = next
            .remove(name)
            .ok_or_else(|| StockError::ItemNotFound(name.to_string()))?;
        self.commit(next).await?;

        tracing::debug!(item = name, "Item deleted");
        Ok(removed)
    }

    pub fn total_value(&self) -> f64 {
        stock_models::total_value(&self.catalog)
    }

    /// Per-item values plus the catalog total.
    pub fn report(&self) -> StockReport {
        StockReport {
            lines: self
                .catalog
                .iter()
                .map(|(name, record)| StockLine::from_record(name, record))
                .collect(),
            total_value: self.total_value(),
        }
    }

    /// Write the current catalog back to the store.
    pub async fn save(&self) -> Result<(), StockError> {
        self.store.save(&self.catalog).await?;
        Ok(())
    }

    async fn commit(&mut self, next: Catalog) -> Result<(), StockError> {
        self.store.save(&next).await?;
        self.catalog = next;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
