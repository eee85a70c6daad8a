//! Session outcome types.

use tts_client::HealthReport;

use crate::error::ReadAloudError;

/// Where the most recent dispatch stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPhase {
    #[default]
    Idle,
    Dispatching,
    Completed,
    Stopped,
    Failed,
}

/// What the service reports for a finished synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    pub success: bool,
    /// File name of the saved audio, on the service's side
    pub saved_as: Option<String>,
    /// Voice actually used (the service may substitute its default)
    pub voice: Option<String>,
    pub paragraphs: Option<u32>,
    pub duration_sec: Option<f64>,
    pub session_id: Option<String>,
}

impl SynthesisResult {
    /// One-line status, e.g. "Playing 3 paragraphs (12.5s)".
    pub fn summary(&self) -> String {
        let duration = self
            .duration_sec
            .map(|d| format!("{:.1}", d))
            .unwrap_or_else(|| "?".to_string());
        match self.paragraphs {
            Some(1) => format!("Playing 1 paragraph ({}s)", duration),
            Some(n) => format!("Playing {} paragraphs ({}s)", n, duration),
            None => format!("Playing ? paragraphs ({}s)", duration),
        }
    }
}

/// How a dispatch ended.
#[derive(Debug)]
pub enum DispatchOutcome {
    Completed(SynthesisResult),
    /// The session was stopped; the service may still report what it played before stopping.
    Stopped {
        session_id: String,
        result: Option<SynthesisResult>,
    },
    Failed(ReadAloudError),
}

impl DispatchOutcome {
    pub fn phase(&self) -> DispatchPhase {
        match self {
            Self::Completed(_) => DispatchPhase::Completed,
            Self::Stopped { .. } => DispatchPhase::Stopped,
            Self::Failed(_) => DispatchPhase::Failed,
        }
    }
}

/// Result of a health check.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceHealth {
    Online(HealthReport),
    /// Reachable but not healthy; carries the service's status string
    Degraded(HealthReport),
    Offline(String),
}

impl ServiceHealth {
    /// The service's own status string, when it answered.
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Online(report) | Self::Degraded(report) => Some(&report.status),
            Self::Offline(_) => None,
        }
    }
}
