//! TTS transport implementations

mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

/// Where the service listens unless configured otherwise
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";
