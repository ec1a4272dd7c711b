use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print the envelope to stdout. Decimals stay full-precision strings.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value) {
        eprintln!("JSON output error: {e}");
    }
}

pub(crate) fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_keeps_decimal_strings() {
        let value = json!({
            "result": {"scheme": "annuity", "fixed_monthly_payment": "954.8305909309618"},
            "warnings": [],
        });
        let mut buf = Vec::new();
        write_json(&mut buf, &value).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("\"fixed_monthly_payment\": \"954.8305909309618\""));
        assert!(text.ends_with("}\n"));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, value);
    }
}
