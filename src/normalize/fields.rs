use serde_json::Value;

/// Read a finite number from a JSON number or a numeric string.
pub fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Read a non-blank string, trimmed.
pub fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Like [`text`], but also accepts numbers and booleans (e.g. `tier: 1`).
pub fn text_or_scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => text(Some(other)),
    }
}

/// First key among `keys` whose value is present and usable by `read`.
pub fn first<T>(obj: &Value, keys: &[&str], read: impl Fn(Option<&Value>) -> Option<T>) -> Option<T> {
    keys.iter().find_map(|k| read(obj.get(*k)))
}

/// The value at `key` when it is a JSON object.
pub fn object<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| v.is_object())
}

/// The items at `key` when it is a JSON array.
pub fn array<'a>(obj: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key).and_then(Value::as_array)
}

/// Non-blank string items of an array; anything else is skipped.
pub fn strings(items: &[Value]) -> Vec<String> {
    items.iter().filter_map(|v| text(Some(v))).collect()
}

pub fn clamp_score(n: f64) -> f64 {
    n.clamp(0.0, 100.0)
}

/// Render a factor weight. Fractions (`0.4`) and percentages (`40`) both
/// become `"40%"`; strings pass through.
pub fn weight(value: Option<&Value>) -> Option<String> {
    if let Some(s) = text(value) {
        if s.parse::<f64>().is_err() {
            return Some(s);
        }
    }
    let n = number(value)?;
    let pct = if n <= 1.0 { n * 100.0 } else { n };
    Some(format!("{}%", pct.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_accepts_numeric_strings() {
        assert_eq!(number(Some(&json!(42))), Some(42.0));
        assert_eq!(number(Some(&json!(" 97.5 "))), Some(97.5));
        assert_eq!(number(Some(&json!("high"))), None);
        assert_eq!(number(Some(&json!(null))), None);
        assert_eq!(number(Some(&json!("NaN"))), None);
        assert_eq!(number(None), None);
    }

    #[test]
    fn test_text_rejects_blank_and_non_strings() {
        assert_eq!(text(Some(&json!("  ok "))), Some("ok".to_string()));
        assert_eq!(text(Some(&json!("   "))), None);
        assert_eq!(text(Some(&json!(5))), None);
        assert_eq!(text_or_scalar(Some(&json!(5))), Some("5".to_string()));
    }

    #[test]
    fn test_weight_formats() {
        assert_eq!(weight(Some(&json!(0.4))), Some("40%".to_string()));
        assert_eq!(weight(Some(&json!(35))), Some("35%".to_string()));
        assert_eq!(weight(Some(&json!("25%"))), Some("25%".to_string()));
        assert_eq!(weight(Some(&json!("0.25"))), Some("25%".to_string()));
        assert_eq!(weight(Some(&json!([]))), None);
    }

    #[test]
    fn test_first_takes_earliest_usable_key() {
        let v = json!({ "a": "", "b": "second", "c": "third" });
        assert_eq!(first(&v, &["a", "b", "c"], text), Some("second".to_string()));
    }
}
