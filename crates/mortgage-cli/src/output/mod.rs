pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Column order of a schedule row, matching `PaymentPeriod`.
pub(crate) const PERIOD_COLUMNS: [&str; 8] = [
    "month",
    "principal_payment",
    "interest_payment",
    "total_payment",
    "after_tax_monthly_cost",
    "remaining_balance",
    "difference_vs_alternate_scheme",
    "discounted_value",
];

/// Render a scalar for display; decimal strings are rounded to 2 places.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => match Decimal::from_str(s) {
            Ok(d) => format!("{:.2}", d.round_dp(2)),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(display_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
