//! Anti-bot challenge detection.

/// Phrases that mark a response as a bot challenge or access denial rather
/// than real content.
const BLOCKED_SIGNALS: &[&str] = &[
    "captcha",
    "access denied",
    "enable javascript",
    "verify you are human",
    "unusual traffic",
    "bot detection",
    "attention required",
];

/// Whether `text` looks like a blocked/challenge page.
///
/// Case-insensitive substring search, first hit wins. The phrases match
/// anywhere in the document, so a page that merely mentions "captcha" in
/// unrelated copy counts as blocked; that trade-off keeps the check cheap
/// and is covered by a test below.
#[must_use]
pub fn is_blocked(text: &str) -> bool {
    let lower = text.to_lowercase();
    BLOCKED_SIGNALS.iter().any(|signal| lower.contains(signal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_access_denied_in_mixed_language_page() {
        let body = "Bitte bestätigen Sie, dass Sie kein Roboter sind. Access Denied.";
        assert!(is_blocked(body));
    }

    #[test]
    fn detects_signals_case_insensitively() {
        assert!(is_blocked("<title>Attention Required! | Cloudflare</title>"));
        assert!(is_blocked("Please ENABLE JAVASCRIPT to continue"));
    }

    #[test]
    fn ordinary_booking_page_is_not_blocked() {
        let body = "Doppelzimmer Seeblick — Gesamtpreis 1.234,56 € für 7 Nächte";
        assert!(!is_blocked(body));
    }

    #[test]
    fn known_limitation_unrelated_mention_still_triggers() {
        // Accepted heuristic trade-off: the phrase list matches anywhere,
        // even in marketing copy about captchas.
        let body = "Unser Buchungssystem verzichtet bewusst auf Captcha-Abfragen.";
        assert!(is_blocked(body));
    }
}
