use thiserror::Error;
use tts_client::TransportError;

#[derive(Error, Debug)]
pub enum ReadAloudError {
    #[error("No text to read")]
    NoText,

    #[error("No active playback")]
    NoActiveSession,

    #[error("{0}")]
    ServiceReportedFailure(String),

    #[error("Cannot connect to TTS server. Is it running on {base_url}?")]
    TransportUnreachable { base_url: String },

    #[error("{message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Unexpected response: {0}")]
    UnexpectedResponseShape(String),

    #[error("Failed to load page: {0}")]
    PageLoad(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl From<TransportError> for ReadAloudError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unreachable { base_url } => Self::TransportUnreachable { base_url },
            TransportError::Http {
                message,
                status_code,
            } => Self::Transport {
                message,
                status_code,
            },
            TransportError::UnexpectedResponse(message) => Self::UnexpectedResponseShape(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadAloudError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_map_to_taxonomy() {
        let err: ReadAloudError = TransportError::Unreachable {
            base_url: "http://localhost:5000".into(),
        }
        .into();
        assert!(matches!(err, ReadAloudError::TransportUnreachable { .. }));
        assert!(err.to_string().contains("localhost:5000"));

        let err: ReadAloudError = TransportError::Http {
            message: "HTTP 502: Bad Gateway".into(),
            status_code: Some(502),
        }
        .into();
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err: ReadAloudError = TransportError::UnexpectedResponse("not json".into()).into();
        assert!(matches!(err, ReadAloudError::UnexpectedResponseShape(_)));
    }

    #[test]
    fn test_local_errors() {
        assert_eq!(ReadAloudError::NoText.to_string(), "No text to read");
        assert_eq!(
            ReadAloudError::NoActiveSession.to_string(),
            "No active playback"
        );
    }
}
