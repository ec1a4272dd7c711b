use serde_json::{Map, Value};
use std::io::{self, Write};

use super::PERIOD_COLUMNS;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

pub(crate) fn write_csv<W: Write>(wtr: &mut csv::Writer<W>, value: &Value) {
    let result = value.as_object().and_then(|m| m.get("result"));

    match result {
        Some(Value::Object(result)) => match result.get("periods") {
            Some(Value::Array(periods)) => write_schedule(wtr, periods, result.get("totals")),
            _ => write_fields(wtr, result),
        },
        _ => {
            if let Value::Object(map) = value {
                write_fields(wtr, map);
            } else {
                let _ = wtr.write_record([format_csv_value(value)]);
            }
        }
    }
}

/// Full precision rows, one per month, then a `total` row.
fn write_schedule<W: Write>(wtr: &mut csv::Writer<W>, periods: &[Value], totals: Option<&Value>) {
    let _ = wtr.write_record(PERIOD_COLUMNS);

    for period in periods {
        if let Value::Object(map) = period {
            let row: Vec<String> = PERIOD_COLUMNS
                .iter()
                .map(|col| map.get(*col).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }

    if let Some(Value::Object(totals)) = totals {
        let row: Vec<String> = PERIOD_COLUMNS
            .iter()
            .map(|col| match *col {
                "month" => "total".to_string(),
                _ => totals.get(*col).map(format_csv_value).unwrap_or_default(),
            })
            .collect();
        let _ = wtr.write_record(&row);
    }
}

fn write_fields<W: Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
