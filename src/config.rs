use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

const VALID_LANGUAGES: &[&str] = &["en", "hi"];

fn default_theme() -> String {
    "midnight".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_target_minutes() -> u32 {
    420
}

fn default_custom_minutes() -> u32 {
    30
}

fn default_model() -> String {
    "gemini-2.5-flash-preview-09-2025".to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Daily study target in minutes. 420 = the seven hour regimen.
    #[serde(default = "default_target_minutes")]
    pub target_minutes: u32,
    /// Default length for ad-hoc focus sessions.
    #[serde(default = "default_custom_minutes")]
    pub custom_session_minutes: u32,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            language: default_language(),
            target_minutes: default_target_minutes(),
            custom_session_minutes: default_custom_minutes(),
            model: default_model(),
            api_key: None,
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("studyr").join("config.toml"))
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => {
                let mut config: Config = toml::from_str(&content).unwrap_or_default();
                config.normalize();
                config
            }
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Clamp out-of-range values back to defaults.
    pub fn normalize(&mut self) {
        if !VALID_LANGUAGES.contains(&self.language.as_str()) {
            self.language = default_language();
        }
        if self.target_minutes == 0 {
            self.target_minutes = default_target_minutes();
        }
        if self.custom_session_minutes == 0 {
            self.custom_session_minutes = default_custom_minutes();
        }
        if self.model.trim().is_empty() {
            self.model = default_model();
        }
    }

    /// Config file key wins over the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.target_minutes, 420);
        assert_eq!(config.language, "en");
        assert_eq!(config.custom_session_minutes, 30);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("language = \"hi\"").unwrap();
        assert_eq!(config.language, "hi");
        assert_eq!(config.theme, "midnight");
        assert_eq!(config.target_minutes, 420);
    }

    #[test]
    fn test_normalize_rejects_unknown_language() {
        let mut config = Config {
            language: "fr".to_string(),
            ..Default::default()
        };
        config.normalize();
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_normalize_zero_minutes() {
        let mut config = Config {
            target_minutes: 0,
            custom_session_minutes: 0,
            ..Default::default()
        };
        config.normalize();
        assert_eq!(config.target_minutes, 420);
        assert_eq!(config.custom_session_minutes, 30);
    }

    #[test]
    fn test_blank_api_key_ignored() {
        let config = Config {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        // Falls through to the env var, which may or may not be set here;
        // the blank config value itself must not be returned.
        if let Some(key) = config.resolve_api_key() {
            assert!(!key.trim().is_empty());
        }
    }
}
