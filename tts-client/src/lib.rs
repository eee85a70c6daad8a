//! Client library for the local Kokoro text-to-speech service
//!
//! Provides a transport abstraction over the service's three endpoints:
//! - `POST /tts` synthesizes (and plays) text for a session
//! - `POST /stop` stops playback for a session
//! - `GET /health` reports service status

pub mod error;
pub mod protocol;
pub mod transport;
pub mod transports;

pub use error::{Result, TransportError};
pub use protocol::{HealthReport, StopAck, SynthesisReply, SynthesisRequest};
pub use transport::TtsTransport;
pub use transports::{DEFAULT_SERVICE_URL, HttpTransport, MockTransport};
