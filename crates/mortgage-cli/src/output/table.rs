use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{display_value, PERIOD_COLUMNS};

const PERIOD_HEADERS: [&str; 8] = [
    "Month",
    "Principal",
    "Interest",
    "Total",
    "After tax",
    "Balance",
    "Diff vs other",
    "Discounted",
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value.as_object() {
        Some(envelope) => match envelope.get("result") {
            Some(Value::Object(result)) => print_result(result, envelope),
            _ => print_fields(envelope),
        },
        None => println!("{}", value),
    }
}

fn print_result(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    if let Some(Value::Array(periods)) = result.get("periods") {
        println!("{}", Table::from(schedule_builder(periods, result.get("totals"))));
        println!();
    }

    let scalars: Map<String, Value> = result
        .iter()
        .filter(|(k, _)| !matches!(k.as_str(), "periods" | "totals" | "interest_benefit"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    print_fields(&scalars);

    if let Some(Value::Object(benefit)) = result.get("interest_benefit") {
        println!("\nInterest benefit of extra repayment:");
        print_fields(benefit);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// One row per month followed by a totals row.
pub(crate) fn schedule_builder(periods: &[Value], totals: Option<&Value>) -> Builder {
    let mut builder = Builder::default();
    builder.push_record(PERIOD_HEADERS);

    for period in periods {
        if let Value::Object(map) = period {
            let row: Vec<String> = PERIOD_COLUMNS
                .iter()
                .map(|col| map.get(*col).map(display_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    if let Some(Value::Object(totals)) = totals {
        let row: Vec<String> = PERIOD_COLUMNS
            .iter()
            .map(|col| match *col {
                "month" => "Total".to_string(),
                "remaining_balance" => String::new(),
                _ => totals.get(*col).map(display_value).unwrap_or_default(),
            })
            .collect();
        builder.push_record(row);
    }

    builder
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &display_value(val)]);
    }
    println!("{}", Table::from(builder));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_table_has_totals_row() {
        let periods = vec![
            json!({"month": 1, "principal_payment": "100", "interest_payment": "5.5561",
                   "total_payment": "105.5561", "after_tax_monthly_cost": "103.5",
                   "remaining_balance": "100", "difference_vs_alternate_scheme": "0",
                   "discounted_value": "0"}),
            json!({"month": 2, "principal_payment": "100", "interest_payment": "2.5",
                   "total_payment": "102.5", "after_tax_monthly_cost": "101.58",
                   "remaining_balance": "0", "difference_vs_alternate_scheme": "0",
                   "discounted_value": "0"}),
        ];
        let totals = json!({"principal_payment": "200", "interest_payment": "8.0561",
                            "total_payment": "208.0561", "after_tax_monthly_cost": "205.08",
                            "difference_vs_alternate_scheme": "0", "discounted_value": "0"});
        let rendered = Table::from(schedule_builder(&periods, Some(&totals))).to_string();
        assert!(rendered.contains("Total"));
        assert!(rendered.contains("208.06"));
        assert!(rendered.contains("5.56"));
    }
}
