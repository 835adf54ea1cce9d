use crate::core::stock::{StockLine, StockReport};

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// `Widget: 10 units @ $2.00 = $20.00`
pub fn format_line(line: &StockLine) -> String {
    format!(
        "{}: {} units @ {} = {}",
        line.name,
        line.quantity,
        format_money(line.unit_price),
        format_money(line.value)
    )
}

pub fn format_report(report: &StockReport) -> String {
    if report.is_empty() {
        return "No items in stock.".to_string();
    }

    let mut out = String::from("\n--- Current Stock ---\n");
    for line in &report.lines {
        out.push_str(&format_line(line));
        out.push('\n');
    }
    out.push_str(&format!(
        "Total stock value: {}",
        format_money(report.total_value)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stock::ItemRecord;

    #[test]
    fn test_format_line() {
        let line = StockLine::from_record("Widget", &ItemRecord::new(10, 2.0));
        assert_eq!(format_line(&line), "Widget: 10 units @ $2.00 = $20.00");
    }

    #[test]
    fn test_format_empty_report() {
        assert_eq!(format_report(&StockReport::default()), "No items in stock.");
    }

    #[test]
    fn test_format_report_with_total() {
        let report = StockReport {
            lines: vec![
                StockLine::from_record("a", &ItemRecord::new(3, 2.5)),
                StockLine::from_record("b", &ItemRecord::new(2, 0.2)),
            ],
            total_value: 7.9,
        };

        let text = format_report(&report);
        assert!(text.starts_with("\n--- Current Stock ---\n"));
        assert!(text.contains("a: 3 units @ $2.50 = $7.50\n"));
        assert!(text.ends_with("Total stock value: $7.90"));
    }
}
