//! Configuration handling for the TUI

use crate::api::DEFAULT_BASE_URL;
use crate::state::FormVariant;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the configured API base URL
pub const BASE_URL_ENV: &str = "OLYMPIAD_API_BASE_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Registration API base URL
    pub api_base_url: Option<String>,
    /// Form shown at startup
    pub default_variant: Option<FormVariant>,
    /// How long toasts stay on screen
    pub toast_duration_secs: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("uz", "olympiad", "olympiad-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user's config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Base URL to use: the override if given, then the file, then the default
    pub fn resolve_base_url(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn variant(&self) -> FormVariant {
        self.default_variant.unwrap_or_default()
    }

    pub fn toast_duration(&self) -> Duration {
        match self.toast_duration_secs {
            Some(secs) if secs > 0 => Duration::from_secs(secs),
            _ => crate::state::NotificationQueue::DEFAULT_TTL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.default_variant.is_none());
        assert!(config.toast_duration_secs.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            api_base_url: Some("https://olympiad.example.uz/".to_string()),
            default_variant: Some(FormVariant::Subject),
            toast_duration_secs: Some(6),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.api_base_url,
            Some("https://olympiad.example.uz/".to_string())
        );
        assert_eq!(parsed.default_variant, Some(FormVariant::Subject));
        assert_eq!(parsed.toast_duration_secs, Some(6));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_base_url.is_none());
        assert_eq!(parsed.variant(), FormVariant::Delegation);
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"default_variant": "guest", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.variant(), FormVariant::Guest);
    }

    #[test]
    fn test_env_override_wins() {
        let config = TuiConfig {
            api_base_url: Some("http://from-file/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_base_url(Some("http://from-env/".to_string())),
            "http://from-env/"
        );
        assert_eq!(config.resolve_base_url(None), "http://from-file/");
    }

    #[test]
    fn test_blank_env_override_is_ignored() {
        let config = TuiConfig::default();
        assert_eq!(config.resolve_base_url(Some("  ".to_string())), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_toast_duration() {
        assert_eq!(
            TuiConfig::default().toast_duration(),
            crate::state::NotificationQueue::DEFAULT_TTL
        );
        let config = TuiConfig {
            toast_duration_secs: Some(10),
            ..Default::default()
        };
        assert_eq!(config.toast_duration(), Duration::from_secs(10));
        let zero = TuiConfig {
            toast_duration_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.toast_duration(), crate::state::NotificationQueue::DEFAULT_TTL);
    }

    mod loading {
        use super::*;

        /// Scratch file path unique to this test process and `name`
        fn scratch_path(name: &str) -> PathBuf {
            std::env::temp_dir().join(format!(
                "olympiad-tui-{}-{name}.json",
                std::process::id()
            ))
        }

        #[test]
        fn test_missing_file_gives_defaults() {
            let path = scratch_path("missing");
            let _ = fs::remove_file(&path);

            let config = TuiConfig::load_from(&path).unwrap();
            assert!(config.api_base_url.is_none());
            assert_eq!(config.variant(), FormVariant::Delegation);
        }

        #[test]
        fn test_reads_file() {
            let path = scratch_path("valid");
            fs::write(
                &path,
                r#"{"api_base_url": "http://olympiad.local", "default_variant": "subject"}"#,
            )
            .unwrap();

            let config = TuiConfig::load_from(&path).unwrap();
            let _ = fs::remove_file(&path);

            assert_eq!(config.resolve_base_url(None), "http://olympiad.local");
            assert_eq!(config.variant(), FormVariant::Subject);
        }

        #[test]
        fn test_malformed_file_is_an_error() {
            let path = scratch_path("malformed");
            fs::write(&path, "{not json").unwrap();

            let result = TuiConfig::load_from(&path);
            let _ = fs::remove_file(&path);

            assert!(result.is_err());
        }
    }
}
