// src/api/models.rs
// =============================================================================
// One menu item as the sandwiches endpoint returns it.
//
// The record is kept exactly as it arrived (every column, whatever its
// type) and read through accessors that follow what the menu page shows:
// - a missing or falsy name shows as "Unnamed Sandwich"
// - the price is read the way parseFloat reads it, NaN if it is not a number
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sandwich(pub Value);

impl Sandwich {
    /// A column of the record, None if absent (or the item is not an object).
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Display name, falling back when the name is missing or falsy.
    pub fn display_name(&self) -> String {
        match self.field("sandwich_name") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => "Unnamed Sandwich".to_string(),
            Some(Value::String(name)) if name.is_empty() => "Unnamed Sandwich".to_string(),
            Some(Value::String(name)) => name.clone(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => "Unnamed Sandwich".to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Price as a float; NaN when it cannot be read as a number.
    pub fn price_value(&self) -> f64 {
        match self.field("price") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(s)) => parse_leading_float(s),
            _ => f64::NAN,
        }
    }

    /// The id as it goes into the card's data attribute.
    pub fn id_text(&self) -> String {
        match self.field("id") {
            None => "undefined".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

// Reads the longest numeric prefix the way parseFloat does:
// "8.50 USD" is 8.5, "1e3" is 1000, "-Infinity" is -inf, "abc" is NaN.
fn parse_leading_float(text: &str) -> f64 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if rest.starts_with("Infinity") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_len = count_digits(rest);
    let mut pos = int_len;
    let mut frac_len = 0;
    if rest[pos..].starts_with('.') {
        frac_len = count_digits(&rest[pos + 1..]);
        pos += 1 + frac_len;
    }
    if int_len == 0 && frac_len == 0 {
        return f64::NAN;
    }

    // An exponent only counts when digits follow it: "2e" is just 2
    let mut exponent = "0";
    let tail = &rest[pos..];
    if tail.starts_with(['e', 'E']) {
        let sign_len = usize::from(tail[1..].starts_with(['+', '-']));
        let exp_digits = count_digits(&tail[1 + sign_len..]);
        if exp_digits > 0 {
            exponent = &tail[1..1 + sign_len + exp_digits];
        }
    }

    let int_part = &rest[..int_len];
    let frac_part = if frac_len > 0 {
        &rest[int_len + 1..int_len + 1 + frac_len]
    } else {
        "0"
    };
    // Always "<int>.<frac>e<exp>", which f64's parser accepts
    let normalized = format!(
        "{}{}.{}e{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        frac_part,
        exponent
    );
    normalized.parse().unwrap_or(f64::NAN)
}

fn count_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sandwich(value: Value) -> Sandwich {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sandwich_price_from_number_and_string() {
        let a = sandwich(json!({"id": 1, "sandwich_name": "BLT", "price": 7.5}));
        let b = sandwich(json!({"id": 2, "sandwich_name": "Club", "price": "8.25"}));
        assert_eq!(a.price_value(), 7.5);
        assert_eq!(b.price_value(), 8.25);
    }

    #[test]
    fn test_sandwich_defaults() {
        let s = sandwich(json!({"id": 3}));
        assert_eq!(s.display_name(), "Unnamed Sandwich");
        assert!(s.price_value().is_nan());
        assert_eq!(s.id_text(), "3");

        let blank = sandwich(json!({"id": 4, "sandwich_name": ""}));
        assert_eq!(blank.display_name(), "Unnamed Sandwich");

        let no_id = sandwich(json!({"sandwich_name": "Reuben"}));
        assert_eq!(no_id.id_text(), "undefined");
    }

    #[test]
    fn test_non_string_name_is_shown() {
        let numbered = sandwich(json!({"id": 5, "sandwich_name": 42, "price": 3}));
        assert_eq!(numbered.display_name(), "42");
    }

    #[test]
    fn test_unknown_columns_survive() {
        let record = json!({"id": 6, "sandwich_name": "Cuban", "price": "9.00", "calories": 500});
        let s = sandwich(record.clone());
        assert_eq!(s.field("calories"), Some(&json!(500)));
        assert_eq!(serde_json::to_value(&s).unwrap(), record);
    }

    #[test]
    fn test_non_object_item_still_reads() {
        let odd = sandwich(json!(17));
        assert_eq!(odd.display_name(), "Unnamed Sandwich");
        assert!(odd.price_value().is_nan());
        assert_eq!(odd.id_text(), "undefined");
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("8.50 USD"), 8.5);
        assert_eq!(parse_leading_float("  -3"), -3.0);
        assert_eq!(parse_leading_float(".5"), 0.5);
        assert_eq!(parse_leading_float("7."), 7.0);
        assert!(parse_leading_float("abc").is_nan());
        assert!(parse_leading_float("").is_nan());
        assert!(parse_leading_float("-").is_nan());
    }

    #[test]
    fn test_parse_leading_float_exponent_and_infinity() {
        assert_eq!(parse_leading_float("1e3"), 1000.0);
        assert_eq!(parse_leading_float("2.5E-1x"), 0.25);
        assert_eq!(parse_leading_float("4e+2"), 400.0);
        assert_eq!(parse_leading_float("2e"), 2.0);
        assert_eq!(parse_leading_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_leading_float("-Infinity and more"), f64::NEG_INFINITY);
    }
}
