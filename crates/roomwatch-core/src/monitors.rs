use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One monitored booking page.
///
/// `price_regex` and `room_hint` drive the explicit-regex extraction path;
/// both are optional — monitors without them rely on the per-host markup
/// strategies and the built-in total-price fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub name: String,
    pub url: String,
    pub price_regex: Option<String>,
    pub room_hint: Option<String>,
    pub notes: Option<String>,
}

impl MonitorConfig {
    /// Generate a URL-safe slug from the monitor name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[derive(Debug, Deserialize)]
pub struct MonitorsFile {
    pub monitors: Vec<MonitorConfig>,
}

/// Load and validate the monitor configuration from a YAML file.
///
/// Supplied price regexes are compiled here so an invalid pattern fails the
/// load instead of failing every extraction attempt later.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_monitors(path: &Path) -> Result<MonitorsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::MonitorsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let monitors_file: MonitorsFile = serde_yaml::from_str(&content)?;

    validate_monitors(&monitors_file)?;

    Ok(monitors_file)
}

fn validate_monitors(monitors_file: &MonitorsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for monitor in &monitors_file.monitors {
        if monitor.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "monitor name must be non-empty".to_string(),
            ));
        }

        if monitor.url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "monitor '{}' has an empty url",
                monitor.name
            )));
        }

        if let Some(pattern) = &monitor.price_regex {
            if let Err(e) = regex::Regex::new(pattern) {
                return Err(ConfigError::Validation(format!(
                    "monitor '{}' has an invalid price_regex: {e}",
                    monitor.name
                )));
            }
        }

        let lower_name = monitor.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate monitor name: '{}'",
                monitor.name
            )));
        }

        let slug = monitor.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate monitor slug: '{}' (from monitor '{}')",
                slug, monitor.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_monitor(name: &str) -> MonitorConfig {
        MonitorConfig {
            name: name.to_string(),
            url: "https://hotel.example.com/booking?date={date}".to_string(),
            price_regex: None,
            room_hint: None,
            notes: None,
        }
    }

    // -----------------------------------------------------------------------
    // slug
    // -----------------------------------------------------------------------

    #[test]
    fn slug_simple_name() {
        assert_eq!(make_monitor("Seehotel Doppelzimmer").slug(), "seehotel-doppelzimmer");
    }

    #[test]
    fn slug_special_characters() {
        assert_eq!(make_monitor("Berghof (Süd)").slug(), "berghof-sd");
    }

    // -----------------------------------------------------------------------
    // validate_monitors
    // -----------------------------------------------------------------------

    #[test]
    fn validate_rejects_empty_name() {
        let file = MonitorsFile {
            monitors: vec![make_monitor("  ")],
        };
        let err = validate_monitors(&file).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_empty_url() {
        let mut monitor = make_monitor("Seehotel");
        monitor.url = String::new();
        let file = MonitorsFile {
            monitors: vec![monitor],
        };
        let err = validate_monitors(&file).unwrap_err();
        assert!(err.to_string().contains("empty url"));
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let file = MonitorsFile {
            monitors: vec![make_monitor("Seehotel"), make_monitor("seehotel")],
        };
        let err = validate_monitors(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate monitor name"));
    }

    #[test]
    fn validate_rejects_invalid_price_regex() {
        let mut monitor = make_monitor("Seehotel");
        monitor.price_regex = Some("€\\s*([0-9,.]".to_string());
        let file = MonitorsFile {
            monitors: vec![monitor],
        };
        let err = validate_monitors(&file).unwrap_err();
        assert!(
            err.to_string().contains("invalid price_regex"),
            "unbalanced pattern must fail at load time, got: {err}"
        );
    }

    #[test]
    fn validate_accepts_valid_monitors() {
        let mut with_regex = make_monitor("Berghof");
        with_regex.price_regex = Some(r"Gesamtpreis\D*([\d.,]+)".to_string());
        with_regex.room_hint = Some("Deluxe Queen".to_string());
        let file = MonitorsFile {
            monitors: vec![make_monitor("Seehotel"), with_regex],
        };
        assert!(validate_monitors(&file).is_ok());
    }

    #[test]
    fn load_monitors_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("monitors.yaml");
        assert!(
            path.exists(),
            "monitors.yaml missing at {path:?} — required for this test"
        );
        let result = load_monitors(&path);
        assert!(result.is_ok(), "failed to load monitors.yaml: {result:?}");
        assert!(!result.unwrap().monitors.is_empty());
    }
}
