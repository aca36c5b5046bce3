//! # Configuration DTO
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No validation logic
//! - No default value calculation: absent keys stay `None` / empty and the
//!   consumer decides what they mean
//!
//! > **This module contains data only, no policy, no validation.**

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Clipboard backend preference as written (`auto`, `wayland`, `x11` or empty)
    pub clipboard_backend: String,

    /// Dialog picker forced by the user (`yad`, `zenity`, `kdialog` or empty)
    pub picker_provider: String,

    /// How long `daemon start` waits before re-probing the child
    pub start_grace_ms: Option<u64>,

    /// Budget for a graceful stop before escalating
    pub stop_timeout_ms: Option<u64>,

    /// Budget after the forceful signal
    pub kill_timeout_ms: Option<u64>,

    /// Interval between liveness probes while stopping
    pub poll_interval_ms: Option<u64>,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation or default
    /// value logic. Missing keys are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let ms_at = |key: &str| {
            toml_value
                .get("daemon")
                .and_then(|d| d.get(key))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
        };

        Ok(Self {
            clipboard_backend: str_at("clipboard", "backend"),
            picker_provider: str_at("picker", "provider"),
            start_grace_ms: ms_at("start_grace_ms"),
            stop_timeout_ms: ms_at("stop_timeout_ms"),
            kill_timeout_ms: ms_at("kill_timeout_ms"),
            poll_interval_ms: ms_at("poll_interval_ms"),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_all_sections() {
        let value: toml::Value = toml::from_str(
            r#"
            [clipboard]
            backend = "wayland"

            [picker]
            provider = "zenity"

            [daemon]
            start_grace_ms = 500
            stop_timeout_ms = 2000
            kill_timeout_ms = 800
            poll_interval_ms = 50
            "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config.clipboard_backend, "wayland");
        assert_eq!(config.picker_provider, "zenity");
        assert_eq!(config.start_grace_ms, Some(500));
        assert_eq!(config.stop_timeout_ms, Some(2000));
        assert_eq!(config.kill_timeout_ms, Some(800));
        assert_eq!(config.poll_interval_ms, Some(50));
    }

    #[test]
    fn missing_sections_stay_empty() {
        let value: toml::Value = toml::from_str("").unwrap();
        let config = AppConfig::from_toml(&value).unwrap();
        assert_eq!(config, AppConfig::empty());
    }
}
