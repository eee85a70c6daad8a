//! Wire types for the TTS service.
//!
//! Field names follow the service's JSON contract (snake_case).

use serde::{Deserialize, Serialize};

/// Body of `POST /tts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Text to speak; paragraphs separated by blank lines.
    pub text: String,
    /// Voice identifier (e.g. `af_bella`).
    pub voice: String,
    /// Playback speed multiplier, strictly positive.
    pub speed: f32,
    /// Language code (e.g. `en-us`).
    pub lang: String,
    /// Opaque session identifier, unique per dispatch.
    pub session_id: String,
}

/// Reply of `POST /tts`.
///
/// The service answers `{success, saved_as, voice, paragraphs, duration_sec, session_id}`
/// on success and `{success: false, error}` when it declines or was stopped early.
/// Every field is optional so a malformed payload can be detected by the caller
/// rather than failing deserialization outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_as: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SynthesisReply {
    /// A successful reply as the service would send it.
    pub fn completed(
        saved_as: impl Into<String>,
        voice: impl Into<String>,
        paragraphs: u32,
        duration_sec: f64,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            success: Some(true),
            saved_as: Some(saved_as.into()),
            voice: Some(voice.into()),
            paragraphs: Some(paragraphs),
            duration_sec: Some(duration_sec),
            session_id: Some(session_id.into()),
            error: None,
        }
    }

    /// A processing failure reported by a reachable service.
    pub fn failed(error: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            success: Some(false),
            error: Some(error.into()),
            session_id,
            ..Self::default()
        }
    }
}

/// Body of `POST /stop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRequest {
    pub session_id: String,
}

/// Raw reply of `POST /stop`.
///
/// Unknown sessions come back as 404 with `{success: false, message}`;
/// a missing id comes back as 400 with `{error}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StopReply {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl StopReply {
    /// Whether the body carried anything the service would send.
    pub fn is_recognized(&self) -> bool {
        self.success.is_some() || self.message.is_some() || self.error.is_some()
    }
}

/// Stop acknowledgement surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopAck {
    pub success: bool,
    pub message: String,
}

impl StopAck {
    pub fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
        }
    }
}

impl From<StopReply> for StopAck {
    fn from(reply: StopReply) -> Self {
        Self {
            success: reply.success.unwrap_or(false),
            message: reply.message.or(reply.error).unwrap_or_default(),
        }
    }
}

/// Reply of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// `healthy`, `healthy (model unloaded - idle)`, `degraded: ...`
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_loaded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voices_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_timeout_seconds: Option<u64>,
}

impl HealthReport {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            uptime_seconds: None,
            model_loaded: None,
            model_file: None,
            voices_file: None,
            idle_timeout_seconds: None,
        }
    }

    /// The service is up when its status mentions "healthy".
    pub fn is_healthy(&self) -> bool {
        self.status.contains("healthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_wire_field_names() {
        let request = SynthesisRequest {
            text: "Hi".to_string(),
            voice: "af_bella".to_string(),
            speed: 1.0,
            lang: "en-us".to_string(),
            session_id: "1700000000000-abcd1234".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["session_id"], "1700000000000-abcd1234");
        assert_eq!(json["voice"], "af_bella");
        assert_eq!(json["speed"], 1.0);
    }

    #[test]
    fn test_parse_success_reply() {
        let body = r#"{"success": true, "saved_as": "tts_af_bella_1a2b3c4d.wav", "voice": "af_bella",
                       "paragraphs": 3, "duration_sec": 12.5, "session_id": "server-side"}"#;
        let reply: SynthesisReply = serde_json::from_str(body).unwrap();
        assert_eq!(reply.success, Some(true));
        assert_eq!(reply.paragraphs, Some(3));
        assert_eq!(reply.session_id.as_deref(), Some("server-side"));
        assert!(reply.error.is_none());
    }

    #[test]
    fn test_parse_failure_reply() {
        let body = r#"{"success": false, "error": "Playback stopped", "session_id": "abc"}"#;
        let reply: SynthesisReply = serde_json::from_str(body).unwrap();
        assert_eq!(reply, SynthesisReply::failed("Playback stopped", Some("abc".into())));
    }

    #[test]
    fn test_stop_reply_to_ack() {
        let reply: StopReply =
            serde_json::from_str(r#"{"success": false, "message": "No active session found: x"}"#)
                .unwrap();
        assert!(reply.is_recognized());
        let ack = StopAck::from(reply);
        assert!(!ack.success);
        assert_eq!(ack.message, "No active session found: x");

        let reply: StopReply = serde_json::from_str(r#"{"error": "No session_id provided"}"#).unwrap();
        assert_eq!(StopAck::from(reply).message, "No session_id provided");

        let reply: StopReply = serde_json::from_str("{}").unwrap();
        assert!(!reply.is_recognized());
    }

    #[test]
    fn test_health_report() {
        let body = r#"{"status": "healthy (model unloaded - idle)", "uptime_seconds": 42.1,
                       "model_loaded": false, "idle_timeout_seconds": 60}"#;
        let report: HealthReport = serde_json::from_str(body).unwrap();
        assert!(report.is_healthy());
        assert_eq!(report.model_loaded, Some(false));

        assert!(!HealthReport::new("degraded: model files missing").is_healthy());
    }
}
