//! Synthesis request construction: defaults and session ids.

use chrono::Utc;
use tts_client::SynthesisRequest;
use uuid::Uuid;

use crate::error::{ReadAloudError, Result};
use crate::extract::ExtractedText;

pub const DEFAULT_VOICE: &str = "af_bella";
pub const DEFAULT_SPEED: f32 = 1.0;
pub const DEFAULT_LANG: &str = "en-us";

/// Voice parameters chosen by the user; anything absent falls back to the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeechParams {
    pub voice: Option<String>,
    pub speed: Option<f32>,
    pub lang: Option<String>,
}

impl SpeechParams {
    /// Fill whatever is absent here from `fallback`.
    pub fn or(self, fallback: &SpeechParams) -> Self {
        Self {
            voice: self.voice.or_else(|| fallback.voice.clone()),
            speed: self.speed.or(fallback.speed),
            lang: self.lang.or_else(|| fallback.lang.clone()),
        }
    }
}

/// Build the request for `text`, or `NoText` when there is nothing to read.
///
/// Empty voice/lang strings and non-positive speeds count as absent.
pub fn build(text: Option<&ExtractedText>, params: &SpeechParams) -> Result<SynthesisRequest> {
    let text = text.ok_or(ReadAloudError::NoText)?;

    let voice = params
        .voice
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_VOICE);
    let lang = params
        .lang
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LANG);
    let speed = params
        .speed
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_SPEED);

    Ok(SynthesisRequest {
        text: text.as_str().to_string(),
        voice: voice.to_string(),
        speed,
        lang: lang.to_string(),
        session_id: new_session_id(),
    })
}

/// Millisecond timestamp plus 48 random bits.
pub fn new_session_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &random[..12])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn text(s: &str) -> ExtractedText {
        ExtractedText::new(s).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let request = build(Some(&text("Hi")), &SpeechParams::default()).unwrap();
        assert_eq!(request.text, "Hi");
        assert_eq!(request.voice, "af_bella");
        assert_eq!(request.speed, 1.0);
        assert_eq!(request.lang, "en-us");
        assert!(!request.session_id.is_empty());
    }

    #[test]
    fn test_overrides_kept() {
        let params = SpeechParams {
            voice: Some("bf_emma".to_string()),
            speed: Some(1.4),
            lang: Some("en-gb".to_string()),
        };
        let request = build(Some(&text("Hi")), &params).unwrap();
        assert_eq!(request.voice, "bf_emma");
        assert_eq!(request.speed, 1.4);
        assert_eq!(request.lang, "en-gb");
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let params = SpeechParams {
            voice: Some("  ".to_string()),
            speed: Some(0.0),
            lang: Some(String::new()),
        };
        let request = build(Some(&text("Hi")), &params).unwrap();
        assert_eq!(request.voice, DEFAULT_VOICE);
        assert_eq!(request.speed, DEFAULT_SPEED);
        assert_eq!(request.lang, DEFAULT_LANG);

        for speed in [-1.0, f32::NAN, f32::INFINITY] {
            let params = SpeechParams {
                speed: Some(speed),
                ..SpeechParams::default()
            };
            assert_eq!(build(Some(&text("Hi")), &params).unwrap().speed, 1.0);
        }
    }

    #[test]
    fn test_no_text() {
        let err = build(None, &SpeechParams::default()).unwrap_err();
        assert!(matches!(err, ReadAloudError::NoText));
    }

    #[test]
    fn test_session_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| new_session_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_params_fallback() {
        let cli = SpeechParams {
            voice: Some("am_adam".to_string()),
            ..SpeechParams::default()
        };
        let config = SpeechParams {
            voice: Some("af_sky".to_string()),
            speed: Some(1.2),
            lang: None,
        };
        let merged = cli.or(&config);
        assert_eq!(merged.voice.as_deref(), Some("am_adam"));
        assert_eq!(merged.speed, Some(1.2));
        assert!(merged.lang.is_none());
    }
}
