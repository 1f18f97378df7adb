//! Structured booking-API response parsing.
//!
//! Unlike the free-text paths, this targets a known shape: a `rooms` array
//! (or a singular `room` object) whose entries carry `pricing.total` and
//! `pricing.night` either as bare scalars or as `{amount, currency}`
//! objects. Field values stay soft-optional; only a structurally empty
//! payload is an error.

use serde_json::Value;

use crate::error::ExtractError;
use crate::normalize::{normalize_currency_lenient, normalize_numeric_field};
use crate::types::ApiRoom;

/// Statuses that mean the room cannot currently be booked.
const BLOCKED_STATUSES: &[&str] = &["blocked", "sold_out", "unavailable", "closed"];

/// Parse a structured API response body into room records.
///
/// # Errors
///
/// Returns [`ExtractError::Deserialize`] for invalid JSON and
/// [`ExtractError::MalformedPayload`] when the payload is not an
/// object/array or contains no room entries. Missing prices inside a room
/// are not errors; the fields stay `None`.
pub fn parse_api_response(body: &str) -> Result<Vec<ApiRoom>, ExtractError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ExtractError::Deserialize {
        context: "api response".to_string(),
        source: e,
    })?;

    let entries: Vec<&Value> = match &value {
        Value::Object(map) => {
            if let Some(rooms) = map.get("rooms").and_then(Value::as_array) {
                rooms.iter().collect()
            } else if let Some(room) = map.get("room") {
                vec![room]
            } else {
                return Err(ExtractError::MalformedPayload {
                    reason: "no rooms array or room object".to_string(),
                });
            }
        }
        Value::Array(items) => items.iter().collect(),
        _ => {
            return Err(ExtractError::MalformedPayload {
                reason: "payload is not an object or array".to_string(),
            });
        }
    };

    if entries.is_empty() {
        return Err(ExtractError::MalformedPayload {
            reason: "no room entries".to_string(),
        });
    }

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| parse_room(entry, idx))
        .collect())
}

fn parse_room(entry: &Value, idx: usize) -> Option<ApiRoom> {
    let room = entry.as_object()?;

    let name = room
        .get("name")
        .or_else(|| room.get("title"))
        .and_then(Value::as_str)
        .map_or_else(|| format!("room {}", idx + 1), str::to_string);

    let pricing = room.get("pricing");
    let total_field = pricing.and_then(|p| p.get("total"));
    let night_field = pricing.and_then(|p| p.get("night"));

    let total = total_field.and_then(amount_of);
    let night = night_field.and_then(amount_of);

    let currency = total_field
        .and_then(currency_of)
        .or_else(|| night_field.and_then(currency_of))
        .or_else(|| room.get("currency").and_then(Value::as_str))
        .and_then(normalize_currency_lenient);

    Some(ApiRoom {
        name,
        total,
        night,
        currency,
        blocked: is_blocked_room(room),
    })
}

/// `pricing.total` is either a scalar or an `{amount, ...}` object.
fn amount_of(field: &Value) -> Option<f64> {
    match field {
        Value::Object(map) => map.get("amount").and_then(normalize_numeric_field),
        other => normalize_numeric_field(other),
    }
}

fn currency_of(field: &Value) -> Option<&str> {
    field.get("currency").and_then(Value::as_str)
}

fn is_blocked_room(room: &serde_json::Map<String, Value>) -> bool {
    if room.get("blocked").and_then(Value::as_bool) == Some(true) {
        return true;
    }
    if let Some(status) = room.get("status").and_then(Value::as_str) {
        if BLOCKED_STATUSES.contains(&status.to_lowercase().as_str()) {
            return true;
        }
    }
    room.get("available").and_then(Value::as_bool) == Some(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_pricing_with_locale_amounts() {
        let body = r#"{
            "rooms": [{
                "name": "Doppelzimmer Seeblick",
                "currency": "eur",
                "pricing": {
                    "total": { "amount": "1.234,56", "currency": "EUR" },
                    "night": { "amount": "123,45" }
                },
                "status": "available"
            }]
        }"#;
        let rooms = parse_api_response(body).unwrap();
        assert_eq!(rooms.len(), 1);
        let room = &rooms[0];
        assert_eq!(room.name, "Doppelzimmer Seeblick");
        assert_eq!(room.total, Some(1234.56));
        assert_eq!(room.night, Some(123.45));
        assert_eq!(room.currency.as_deref(), Some("EUR"));
        assert!(!room.blocked);
    }

    #[test]
    fn scalar_pricing_and_available_false() {
        let body = r#"{
            "rooms": [{ "currency": "USD", "pricing": { "total": 499.99 }, "available": false }]
        }"#;
        let rooms = parse_api_response(body).unwrap();
        let room = &rooms[0];
        assert_eq!(room.total, Some(499.99));
        assert_eq!(room.night, None);
        assert_eq!(room.currency.as_deref(), Some("USD"));
        assert!(room.blocked);
    }

    #[test]
    fn singular_room_object_is_wrapped() {
        let body = r#"{ "room": { "name": "Suite", "pricing": { "night": "189,00" } } }"#;
        let rooms = parse_api_response(body).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].night, Some(189.0));
        assert_eq!(rooms[0].total, None);
    }

    #[test]
    fn top_level_array_is_a_bare_rooms_list() {
        let body = r#"[ { "pricing": { "total": 450 } } ]"#;
        let rooms = parse_api_response(body).unwrap();
        assert_eq!(rooms[0].total, Some(450.0));
        assert_eq!(rooms[0].name, "room 1");
    }

    #[test]
    fn status_sold_out_blocks() {
        let body = r#"{ "rooms": [ { "status": "SOLD_OUT" } ] }"#;
        let rooms = parse_api_response(body).unwrap();
        assert!(rooms[0].blocked);
    }

    #[test]
    fn explicit_blocked_flag_wins_over_status() {
        let body = r#"{ "rooms": [ { "blocked": true, "status": "available" } ] }"#;
        let rooms = parse_api_response(body).unwrap();
        assert!(rooms[0].blocked);
    }

    #[test]
    fn unknown_currency_passes_through_leniently() {
        let body = r#"{ "rooms": [ { "currency": "nok", "pricing": { "total": 1800 } } ] }"#;
        let rooms = parse_api_response(body).unwrap();
        assert_eq!(rooms[0].currency.as_deref(), Some("NOK"));
    }

    #[test]
    fn invalid_json_is_a_deserialize_error() {
        let err = parse_api_response("{ not json").unwrap_err();
        assert!(matches!(err, ExtractError::Deserialize { .. }));
    }

    #[test]
    fn object_without_rooms_is_malformed() {
        let err = parse_api_response(r#"{ "meta": {} }"#).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedPayload { .. }));
    }

    #[test]
    fn scalar_payload_is_malformed() {
        let err = parse_api_response("42").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedPayload { .. }));
    }

    #[test]
    fn empty_rooms_array_is_malformed() {
        let err = parse_api_response(r#"{ "rooms": [] }"#).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedPayload { .. }));
    }
}
