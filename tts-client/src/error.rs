use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Cannot connect to TTS server. Is it running on {base_url}?")]
    Unreachable { base_url: String },

    #[error("{message}")]
    Http {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Unexpected response from TTS server: {0}")]
    UnexpectedResponse(String),
}

impl TransportError {
    /// HTTP status code of the failed exchange, when the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_message_names_the_server() {
        let err = TransportError::Unreachable {
            base_url: "http://localhost:5000".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot connect to TTS server. Is it running on http://localhost:5000?"
        );
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_http_error_surfaces_message() {
        let err = TransportError::Http {
            message: "Failed to load TTS model: missing file".to_string(),
            status_code: Some(500),
        };
        assert_eq!(err.to_string(), "Failed to load TTS model: missing file");
        assert_eq!(err.status_code(), Some(500));
    }
}
