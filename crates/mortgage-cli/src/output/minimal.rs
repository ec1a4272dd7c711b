use serde_json::Value;

use super::display_value;

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, then falls
/// back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

pub(crate) fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["fixed_monthly_payment", "interest_saved"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return display_value(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, display_value(val));
        }
    }

    display_value(result_obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_prefers_monthly_payment() {
        let v = json!({"result": {"scheme": "annuity", "fixed_monthly_payment": "954.8305"}});
        assert_eq!(minimal_line(&v), "954.83");
    }

    #[test]
    fn test_minimal_interest_benefit() {
        let v = json!({"result": {"scheme": "linear", "interest_saved": "10450.129"}});
        assert_eq!(minimal_line(&v), "10450.13");
    }
}
