//! Regex-driven price extraction with an optional room hint.
//!
//! Booking pages repeat numbers everywhere (room sizes, dates, ratings).
//! When a monitor carries a `room_hint`, the search subject narrows to a
//! 2000-character window around the first hint occurrence so the configured
//! regex cannot latch onto an unrelated number at the other end of the page.

use regex::Regex;
use roomwatch_core::{MonitorConfig, PriceResult};

use crate::error::ExtractError;

/// Window bounds around the hint position, in bytes.
const WINDOW_BEFORE: usize = 500;
const WINDOW_AFTER: usize = 1500;

/// Built-in pattern for German "Gesamtpreis" labels: the label, any run of
/// non-digits, then the numeral run.
const DEFAULT_TOTAL_REGEX: &str = r"(?i)Gesamtpreis\D*(\d[\d.,]*\d|\d)";

/// Fallback patterns anchored on the `tcpPrice__value` class name used by a
/// common booking widget. Tried in order when the Gesamtpreis label is
/// absent.
const TOTAL_FALLBACK_REGEXES: &[&str] = &[
    r#"tcpPrice__value[^>]*>\s*(\d[\d.,]*\d|\d)"#,
    r#"(?s)tcpPrice__value.{0,120}?(\d[\d.,]*\d|\d)"#,
];

/// Extract one price from `html` using the monitor's configured regex.
///
/// Currency is not inferred on this path; the caller decides whether to
/// decorate the result.
///
/// # Errors
///
/// Returns [`ExtractError::MissingRegex`] when the monitor has no
/// `price_regex`, and [`ExtractError::InvalidRegex`] when the pattern does
/// not compile. A regex that simply matches nothing is `Ok(None)`.
pub fn extract_price(
    html: &str,
    monitor: &MonitorConfig,
) -> Result<Option<PriceResult>, ExtractError> {
    let pattern = monitor
        .price_regex
        .as_deref()
        .ok_or(ExtractError::MissingRegex)?;
    extract_with(html, pattern, monitor.room_hint.as_deref())
}

/// Extract the stay total using the built-in Gesamtpreis pattern, or
/// `regex` when one is supplied.
///
/// With an explicit `regex` the result is returned verbatim, even `None`.
/// With the default pattern, a miss retries against the `tcpPrice__value`
/// fallbacks in order.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidRegex`] when the supplied pattern does not
/// compile.
pub fn extract_total_price(
    html: &str,
    regex: Option<&str>,
) -> Result<Option<PriceResult>, ExtractError> {
    if let Some(pattern) = regex {
        return extract_with(html, pattern, Some("Gesamtpreis"));
    }

    if let Some(result) = extract_with(html, DEFAULT_TOTAL_REGEX, Some("Gesamtpreis"))? {
        return Ok(Some(result));
    }

    for pattern in TOTAL_FALLBACK_REGEXES {
        if let Some(result) = extract_with(html, pattern, Some("tcpPrice__value"))? {
            return Ok(Some(result));
        }
    }

    Ok(None)
}

fn extract_with(
    html: &str,
    pattern: &str,
    hint: Option<&str>,
) -> Result<Option<PriceResult>, ExtractError> {
    let re = Regex::new(pattern).map_err(|e| ExtractError::InvalidRegex {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let subject = hint
        .and_then(|h| hint_window(html, h))
        .unwrap_or(html);

    let Some(caps) = re.captures(subject) else {
        return Ok(None);
    };
    let matched = caps
        .get(1)
        .or_else(|| caps.get(0))
        .map_or("", |m| m.as_str());

    Ok(parse_matched_price(matched))
}

/// Narrow `html` to `[hint_pos - 500, hint_pos + 1500]` around the first
/// case-insensitive occurrence of `hint`, clamped to the document and to
/// UTF-8 boundaries. `None` when the hint does not occur.
pub(crate) fn hint_window<'a>(html: &'a str, hint: &str) -> Option<&'a str> {
    let pos = html.to_lowercase().find(&hint.to_lowercase())?;

    let mut start = pos.saturating_sub(WINDOW_BEFORE).min(html.len());
    while !html.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = pos.saturating_add(WINDOW_AFTER).min(html.len());
    while !html.is_char_boundary(end) {
        end += 1;
    }

    Some(&html[start..end])
}

/// Clean a regex match down to its numeral content and parse it.
///
/// Keeps only digits, `,` and `.`; an empty remainder or unparseable number
/// is a no-match, not an error.
pub(crate) fn parse_matched_price(matched: &str) -> Option<PriceResult> {
    let raw: String = matched
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if raw.is_empty() {
        return None;
    }

    let value = raw.replace('.', "").replace(',', ".").parse::<f64>().ok()?;

    Some(PriceResult {
        raw,
        value,
        currency: None,
    })
}
