//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Read the TOML configuration file
//! - Parse TOML into the `AppConfig` DTO
//! - Report I/O and parsing errors with context
//!
//! ## Prohibited
//!
//! - No validation logic
//! - No default value logic: consumers decide what absent keys mean
//!
//! > **Pure data loading only. Accept whatever is in the file.**

use anyhow::Context;
use std::path::{Path, PathBuf};

use sc_core::config::AppConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config as TOML: {}", config_path.display()))?;
    AppConfig::from_toml(&toml_value)
}

/// Load the explicit config, or the default one if it exists.
///
/// A missing default file is not an error; a missing explicit file is.
pub fn resolve_config(explicit: Option<PathBuf>, default_path: &Path) -> anyhow::Result<AppConfig> {
    match explicit {
        Some(path) => load_config(path),
        None if default_path.exists() => load_config(default_path.to_path_buf()),
        None => Ok(AppConfig::empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_temp(
            r#"
            [clipboard]
            backend = "x11"

            [picker]
            provider = "zenity"

            [daemon]
            start_grace_ms = 1500
            stop_timeout_ms = 5000
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.clipboard_backend, "x11");
        assert_eq!(config.picker_provider, "zenity");
        assert_eq!(config.start_grace_ms, Some(1500));
        assert_eq!(config.stop_timeout_ms, Some(5000));
        assert_eq!(config.kill_timeout_ms, None);
    }

    #[test]
    fn test_load_config_returns_empty_values_when_missing() {
        let temp_file = write_temp(
            r#"
            [clipboard]
            # backend is missing
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let temp_file = write_temp("[clipboard\nbackend = ");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_resolve_config_tolerates_missing_default() {
        let dir = tempfile::TempDir::new().unwrap();

        let config = resolve_config(None, &dir.path().join("config.toml")).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_resolve_config_requires_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = resolve_config(Some(missing), &dir.path().join("config.toml")).unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_resolve_config_prefers_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let default_path = dir.path().join("config.toml");
        std::fs::write(&default_path, "[picker]\nprovider = \"yad\"\n").unwrap();
        let explicit = write_temp("[picker]\nprovider = \"kdialog\"\n");

        let config = resolve_config(Some(explicit.path().to_path_buf()), &default_path).unwrap();
        assert_eq!(config.picker_provider, "kdialog");

        let config = resolve_config(None, &default_path).unwrap();
        assert_eq!(config.picker_provider, "yad");
    }
}
