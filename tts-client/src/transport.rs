use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::{HealthReport, StopAck, SynthesisReply, SynthesisRequest};

/// Trait for TTS service transports
///
/// Implementations carry requests to the service and hand back its replies
/// untouched; interpreting them is the caller's business.
#[async_trait]
pub trait TtsTransport: Send + Sync {
    /// Submit text for synthesis. Resolves once the service has finished (or stopped) the session.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisReply>;

    /// Ask the service to stop the given session
    async fn stop(&self, session_id: &str) -> Result<StopAck>;

    /// Query service status
    async fn health(&self) -> Result<HealthReport>;

    /// Where requests go, for display
    fn endpoint(&self) -> &str;
}
