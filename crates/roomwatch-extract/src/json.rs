//! Price candidate extraction from arbitrary JSON documents.
//!
//! Captured XHR bodies rarely follow a known schema, so this walks the whole
//! document and surfaces every numeric or stringified-numeric leaf that sits
//! under a price-suggesting key (`price`, `amount`, `total`, `rate` — own key
//! or any ancestor). Without that gate every latitude, score and ID in the
//! payload would become a candidate and could outrank the real price.

use regex::Regex;
use serde_json::Value;

use crate::normalize::{normalize_amount, normalize_currency_lenient};
use crate::scan::find_primary_price;
use crate::types::JsonCandidate;

const PRICE_KEY_PATTERN: &str = "(?i)price|amount|total|rate";

/// Walk `value` and collect all price candidates in traversal order.
#[must_use]
pub fn extract_candidates_from_json(value: &Value) -> Vec<JsonCandidate> {
    let key_re = Regex::new(PRICE_KEY_PATTERN).expect("valid regex");
    let mut out = Vec::new();
    let mut path = Vec::new();
    walk(value, &mut path, None, None, false, &key_re, &mut out);
    out
}

/// Pick one candidate: the first whose key mentions "total", else the first
/// in traversal order. Empty input yields `None`.
#[must_use]
pub fn pick_preferred_json_price(candidates: &[JsonCandidate]) -> Option<&JsonCandidate> {
    let total_re = Regex::new("(?i)total").expect("valid regex");
    candidates
        .iter()
        .find(|c| total_re.is_match(&c.key))
        .or_else(|| candidates.first())
}

/// Whether any key anywhere in `value` suggests a price.
///
/// Used upstream to decide if a captured network response is worth keeping;
/// recursion stops at the first hit.
#[must_use]
pub fn contains_price_keys(value: &Value) -> bool {
    let key_re = Regex::new(PRICE_KEY_PATTERN).expect("valid regex");
    has_price_key(value, &key_re)
}

fn has_price_key(value: &Value, key_re: &Regex) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(k, v)| key_re.is_match(k) || has_price_key(v, key_re)),
        Value::Array(items) => items.iter().any(|v| has_price_key(v, key_re)),
        _ => false,
    }
}

#[allow(clippy::too_many_arguments)]
fn walk(
    value: &Value,
    path: &mut Vec<String>,
    last_key: Option<&str>,
    enclosing_currency: Option<&str>,
    priceish: bool,
    key_re: &Regex,
    out: &mut Vec<JsonCandidate>,
) {
    match value {
        Value::Object(map) => {
            let currency = map
                .get("currency")
                .or_else(|| map.get("curr"))
                .and_then(Value::as_str);
            for (k, v) in map {
                let child_priceish = priceish || key_re.is_match(k);
                path.push(k.clone());
                walk(v, path, Some(k), currency, child_priceish, key_re, out);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                path.push(i.to_string());
                walk(v, path, last_key, enclosing_currency, priceish, key_re, out);
                path.pop();
            }
        }
        Value::Number(n) => {
            if priceish {
                if let Some(value) = n.as_f64() {
                    out.push(JsonCandidate {
                        path: path.join("."),
                        value,
                        currency: enclosing_currency.and_then(normalize_currency_lenient),
                        key: last_key.unwrap_or_default().to_string(),
                    });
                }
            }
        }
        Value::String(s) => {
            if priceish && s.chars().any(|c| c.is_ascii_digit()) {
                if let Some((value, currency)) = price_from_string(s) {
                    out.push(JsonCandidate {
                        path: path.join("."),
                        value,
                        currency: currency
                            .or_else(|| enclosing_currency.and_then(normalize_currency_lenient)),
                        key: last_key.unwrap_or_default().to_string(),
                    });
                }
            }
        }
        Value::Bool(_) | Value::Null => {}
    }
}

/// A string leaf either scans like free text (`"€ 189,00"`) or is a bare
/// locale-formatted numeral (`"189,00"`).
fn price_from_string(s: &str) -> Option<(f64, Option<String>)> {
    if let Some(classified) = find_primary_price(s) {
        return Some((classified.price.value, classified.price.currency));
    }
    normalize_amount(s).map(|v| (v, None))
}
