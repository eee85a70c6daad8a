//! HTTP transport
//!
//! Direct reqwest implementation of the service's JSON endpoints.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::{Result, TransportError};
use crate::protocol::{
    HealthReport, StopAck, StopReply, StopRequest, SynthesisReply, SynthesisRequest,
};
use crate::transport::TtsTransport;

/// Transport for a TTS service reachable over HTTP
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Create a transport for the service at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Connection-level failures get the friendly message; anything else keeps its own.
    fn send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_connect() {
            TransportError::Unreachable {
                base_url: self.base_url.clone(),
            }
        } else {
            TransportError::Http {
                message: format!("Request failed: {}", err),
                status_code: err.status().map(|s| s.as_u16()),
            }
        }
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<(StatusCode, String)> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.send_error(e))?;
        Ok((status, body))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Error for a non-2xx reply: the service's own message when it sent one.
fn status_error(status: StatusCode, body: &str) -> TransportError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("HTTP {}: {}", status.as_u16(), reason),
            None => format!("HTTP {}", status.as_u16()),
        });

    TransportError::Http {
        message,
        status_code: Some(status.as_u16()),
    }
}

#[async_trait]
impl TtsTransport for HttpTransport {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisReply> {
        let url = self.url("/tts");
        debug!(
            "POST {} (session {}, {} chars)",
            url,
            request.session_id,
            request.text.len()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let (status, body) = self.read_body(response).await?;
        debug!("/tts answered {}", status);

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            TransportError::UnexpectedResponse(format!("Failed to parse /tts response: {}", e))
        })
    }

    async fn stop(&self, session_id: &str) -> Result<StopAck> {
        let url = self.url("/stop");
        debug!("POST {} (session {})", url, session_id);

        let response = self
            .client
            .post(&url)
            .json(&StopRequest {
                session_id: session_id.to_string(),
            })
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let (status, body) = self.read_body(response).await?;
        debug!("/stop answered {}", status);

        // Unknown sessions are reported as 404 with a regular body
        match serde_json::from_str::<StopReply>(&body) {
            Ok(reply) if reply.is_recognized() => Ok(reply.into()),
            _ if !status.is_success() => Err(status_error(status, &body)),
            Ok(_) => Err(TransportError::UnexpectedResponse(
                "Empty /stop response".to_string(),
            )),
            Err(e) => Err(TransportError::UnexpectedResponse(format!(
                "Failed to parse /stop response: {}",
                e
            ))),
        }
    }

    async fn health(&self) -> Result<HealthReport> {
        let url = self.url("/health");
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let (status, body) = self.read_body(response).await?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            TransportError::UnexpectedResponse(format!("Failed to parse /health response: {}", e))
        })
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
