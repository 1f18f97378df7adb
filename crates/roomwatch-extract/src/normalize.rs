//! Amount and currency normalization.
//!
//! Pure functions; malformed input yields `None`, never a panic. Two currency
//! normalizers exist on purpose: the strict one backs free-text scanning where
//! an unknown symbol means "not a currency", the lenient one backs structured
//! API fields where unrecognized ISO codes must survive untouched. Routing a
//! caller to the wrong one silently changes which currencies are accepted.

/// Parse a raw amount string into a float.
///
/// Disambiguation rules for European vs. US formatting:
/// - both `,` and `.` present → `.` is a thousands separator, `,` is the
///   decimal separator (`"1.234,56"` → `1234.56`)
/// - only `,` present → decimal separator (`"189,00"` → `189.0`)
/// - neither → parse as-is (`"1234.56"` → `1234.56`)
///
/// Ordinary spaces and non-breaking spaces are stripped first.
#[must_use]
pub fn normalize_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|&c| c != ' ' && c != '\u{a0}')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.contains(',') {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok()
}

/// Strict currency normalization: symbol/code table only.
///
/// Maps `€`/`$`/`£` to their ISO codes and passes through the recognized
/// codes `EUR`, `CHF`, `USD`, `GBP` (case-insensitive). Anything else is
/// `None` — in free text, an unknown symbol next to a number is more likely
/// a unit than a currency.
#[must_use]
pub fn normalize_currency(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    match trimmed {
        "€" => return Some("EUR".to_string()),
        "$" => return Some("USD".to_string()),
        "£" => return Some("GBP".to_string()),
        _ => {}
    }
    let upper = trimmed.to_uppercase();
    match upper.as_str() {
        "EUR" | "CHF" | "USD" | "GBP" => Some(upper),
        _ => None,
    }
}

/// Lenient currency normalization for structured API fields.
///
/// Known symbols map like the strict table; everything else is trimmed,
/// uppercased and passed through so exotic-but-valid ISO codes from an API
/// payload are not dropped. Empty input is `None`.
#[must_use]
pub fn normalize_currency_lenient(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed {
        "€" => Some("EUR".to_string()),
        "$" => Some("USD".to_string()),
        "£" => Some("GBP".to_string()),
        _ => Some(trimmed.to_uppercase()),
    }
}

/// Tolerant numeric coercion for JSON fields that may be numbers or
/// locale-formatted strings.
///
/// Strings additionally tolerate multiple dots (`"1.234.56"`): only the last
/// dot-delimited group is treated as decimals.
#[must_use]
pub fn normalize_numeric_field(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => tolerant_parse_amount(s),
        _ => None,
    }
}

fn tolerant_parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|&c| c != ' ' && c != '\u{a0}')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        // Dots are grouping; the last comma is the decimal mark.
        let without_dots = cleaned.replace('.', "");
        match without_dots.rfind(',') {
            Some(pos) => {
                let mut s = without_dots.replace(',', "");
                let decimals = without_dots.len() - pos - 1;
                if decimals > 0 {
                    s.insert(s.len() - decimals, '.');
                }
                s
            }
            None => without_dots,
        }
    } else {
        let dot_count = cleaned.matches('.').count();
        if dot_count > 1 {
            // Keep only the last dot as the decimal mark.
            let last = cleaned.rfind('.').unwrap_or(0);
            cleaned
                .char_indices()
                .filter(|&(i, c)| c != '.' || i == last)
                .map(|(_, c)| c)
                .collect()
        } else {
            cleaned
        }
    };

    normalized.parse::<f64>().ok()
}
