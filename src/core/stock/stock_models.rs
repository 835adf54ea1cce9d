use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every tracked item, keyed by its exact (case-sensitive) name.
pub type Catalog = BTreeMap<String, ItemRecord>;

/// Quantity and unit price for one item.
///
/// The price is stored on disk as `price` so existing data files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub quantity: i64,
    #[serde(rename = "price")]
    pub unit_price: f64,
}

impl ItemRecord {
    pub fn new(quantity: i64, unit_price: f64) -> Self {
        Self {
            quantity,
            unit_price,
        }
    }

    /// Stock value of this record (`quantity * unit_price`).
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// What happened to an item after a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated { new_quantity: i64 },
    /// Quantity reached zero or below, so the item was dropped.
    Removed,
}

/// One row of the stock report.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub value: f64,
}

impl StockLine {
    pub fn from_record(name: &str, record: &ItemRecord) -> Self {
        Self {
            name: name.to_string(),
            quantity: record.quantity,
            unit_price: record.unit_price,
            value: record.value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StockReport {
    pub lines: Vec<StockLine>,
    pub total_value: f64,
}

impl StockReport {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Sum of `quantity * unit_price` over the whole catalog.
pub fn total_value(catalog: &Catalog) -> f64 {
    catalog.values().map(ItemRecord::value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_value_empty() {
        assert_eq!(total_value(&Catalog::new()), 0.0);
    }

    #[test]
    fn test_total_value_single_item() {
        let mut catalog = Catalog::new();
        catalog.insert("a".to_string(), ItemRecord::new(3, 2.5));
        assert_eq!(total_value(&catalog), 7.5);
    }

    #[test]
    fn test_record_uses_price_on_the_wire() {
        let json = serde_json::to_value(ItemRecord::new(4, 1.25)).unwrap();
        assert_eq!(json, serde_json::json!({ "quantity": 4, "price": 1.25 }));

        let parsed: ItemRecord =
            serde_json::from_str(r#"{ "quantity": 2, "price": 0.5 }"#).unwrap();
        assert_eq!(parsed, ItemRecord::new(2, 0.5));
    }
}
