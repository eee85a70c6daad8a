//! read-aloud configuration management.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::envelope::SpeechParams;
use crate::error::{ReadAloudError, Result};
use crate::extract::dom::Selector;
use crate::extract::{DEFAULT_CONTAINER_SELECTOR, DEFAULT_MIN_FONT_SIZE_PX, Extractor};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadAloudConfig {
    /// Base URL of the TTS service
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Preferred voice. None means the service default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Preferred speed multiplier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,

    /// Preferred language code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Selector for the page's primary content container
    #[serde(default = "default_content_selector")]
    pub content_selector: String,

    /// Text rendered smaller than this is skipped when no container is found
    #[serde(default = "default_min_font_size")]
    pub min_font_size_px: f32,
}

fn default_service_url() -> String {
    tts_client::DEFAULT_SERVICE_URL.to_string()
}

fn default_content_selector() -> String {
    DEFAULT_CONTAINER_SELECTOR.to_string()
}

fn default_min_font_size() -> f32 {
    DEFAULT_MIN_FONT_SIZE_PX
}

impl Default for ReadAloudConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            voice: None,
            speed: None,
            lang: None,
            content_selector: default_content_selector(),
            min_font_size_px: default_min_font_size(),
        }
    }
}

impl ReadAloudConfig {
    /// Get the config file path: ~/.config/cli-programs/read-aloud.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| ReadAloudError::Config("HOME not set".into()))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("read-aloud.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: ReadAloudConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// The saved voice preferences.
    pub fn speech_params(&self) -> SpeechParams {
        SpeechParams {
            voice: self.voice.clone(),
            speed: self.speed,
            lang: self.lang.clone(),
        }
    }

    /// Extractor for the configured container selector and font threshold.
    pub fn extractor(&self) -> Result<Extractor> {
        let container: Selector = self.content_selector.parse()?;
        Ok(Extractor::new(container, self.min_font_size_px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReadAloudConfig::default();
        assert_eq!(config.service_url, "http://localhost:5000");
        assert_eq!(config.content_selector, ".mbh-content");
        assert_eq!(config.min_font_size_px, 8.0);
        assert!(config.voice.is_none());
        assert!(config.speed.is_none());
        assert!(config.lang.is_none());
    }

    #[test]
    fn test_config_path() {
        let path = ReadAloudConfig::config_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.ends_with("cli-programs/read-aloud.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r##"
service_url = "http://tts.lan:5000"
voice = "bf_emma"
speed = 1.25
lang = "en-gb"
content_selector = "#article"
"##;
        let config: ReadAloudConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.service_url, "http://tts.lan:5000");
        assert_eq!(config.voice.as_deref(), Some("bf_emma"));
        assert_eq!(config.speed, Some(1.25));
        assert_eq!(config.lang.as_deref(), Some("en-gb"));
        assert_eq!(config.content_selector, "#article");
        assert_eq!(config.min_font_size_px, 8.0);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: ReadAloudConfig = toml::from_str("").unwrap();
        assert_eq!(config.service_url, "http://localhost:5000");
        assert!(config.voice.is_none());
    }

    #[test]
    fn test_speech_params_from_config() {
        let config = ReadAloudConfig {
            voice: Some("am_adam".into()),
            speed: Some(1.5),
            ..ReadAloudConfig::default()
        };
        let params = config.speech_params();
        assert_eq!(params.voice.as_deref(), Some("am_adam"));
        assert_eq!(params.speed, Some(1.5));
        assert_eq!(params.lang, None);
    }

    #[test]
    fn test_extractor_from_config() {
        let config = ReadAloudConfig {
            content_selector: "#article".into(),
            ..ReadAloudConfig::default()
        };
        assert!(config.extractor().is_ok());

        let config = ReadAloudConfig {
            content_selector: "div > p".into(),
            ..ReadAloudConfig::default()
        };
        assert!(matches!(
            config.extractor(),
            Err(ReadAloudError::Config(_))
        ));
    }

    #[test]
    fn test_config_roundtrip_omits_unset_preferences() {
        let config = ReadAloudConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_str.contains("voice"));
        let parsed: ReadAloudConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.content_selector, config.content_selector);
    }
}
