//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`Settings::default()`]
//! 2. If the settings file exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::Settings;

/// Resolve the default settings file path (`./tareas.json`).
pub fn settings_path() -> PathBuf {
    PathBuf::from("tareas.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<Settings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let defaults = serde_json::to_value(Settings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: Settings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Each env var has strict parsing rules:
/// - Integers must be valid and within the specified range
/// - Booleans accept: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`
/// - Invalid values are silently ignored (fall back to file/default)
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Some(v) = read_env_string("TAREAS_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read_env_u16("TAREAS_PORT", 1, 65535) {
        settings.server.port = v;
    }
    if let Some(v) = read_env_bool("TAREAS_DEV_MODE") {
        settings.server.dev_mode = v;
    }
    if let Some(v) = read_env_string("TAREAS_LOG_PATH") {
        settings.audit.log_path = v;
    }
}

/// Read a non-empty string env var.
fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Read a u16 env var within `[min, max]`.
fn read_env_u16(name: &str, min: u16, max: u16) -> Option<u16> {
    parse_u16_in_range(&std::env::var(name).ok()?, min, max)
}

/// Read a boolean env var with lenient spellings.
fn read_env_bool(name: &str) -> Option<bool> {
    parse_bool(&std::env::var(name).ok()?)
}

/// Parse a u16 within `[min, max]`; out-of-range or garbage yields `None`.
fn parse_u16_in_range(value: &str, min: u16, max: u16) -> Option<u16> {
    value.parse::<u16>().ok().filter(|v| (min..=max).contains(v))
}

/// Parse a lenient boolean: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    // ── deep_merge ───────────────────────────────────────────────────

    #[test]
    fn merge_overrides_scalars() {
        let merged = deep_merge(json!({"a": 1, "b": 2}), json!({"b": 3}));
        assert_eq!(merged, json!({"a": 1, "b": 3}));
    }

    #[test]
    fn merge_recurses_into_objects() {
        let merged = deep_merge(
            json!({"server": {"host": "127.0.0.1", "port": 3000}}),
            json!({"server": {"port": 8080}}),
        );
        assert_eq!(
            merged,
            json!({"server": {"host": "127.0.0.1", "port": 8080}})
        );
    }

    #[test]
    fn merge_skips_nulls() {
        let merged = deep_merge(json!({"a": 1}), json!({"a": null}));
        assert_eq!(merged, json!({"a": 1}));
    }

    #[test]
    fn merge_replaces_arrays_entirely() {
        let merged = deep_merge(json!({"a": [1, 2]}), json!({"a": [3]}));
        assert_eq!(merged, json!({"a": [3]}));
    }

    // ── load_settings_from_path ──────────────────────────────────────

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from_path(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn file_values_merge_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tareas.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{"server": {"port": 4000, "dev_mode": true}}"#)
            .unwrap();
        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.server.port, 4000);
        assert!(settings.server.dev_mode);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.audit.log_path, "logs/api.log");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tareas.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_settings_from_path(&path).is_err());
    }

    // ── env parsing helpers ──────────────────────────────────────────
    //
    // read_env_* goes through process-global env vars, so tests exercise
    // the parsing layer directly.

    #[test]
    fn bool_spellings() {
        for (value, expected) in [
            ("true", Some(true)),
            ("1", Some(true)),
            ("YES", Some(true)),
            ("on", Some(true)),
            ("false", Some(false)),
            ("0", Some(false)),
            ("no", Some(false)),
            ("OFF", Some(false)),
            ("quizás", None),
        ] {
            assert_eq!(parse_bool(value), expected, "value {value:?}");
        }
    }

    #[test]
    fn port_range_filter() {
        assert_eq!(parse_u16_in_range("8080", 1, 65535), Some(8080));
        assert_eq!(parse_u16_in_range("0", 1, 65535), None);
        assert_eq!(parse_u16_in_range("puerto", 1, 65535), None);
    }
}
