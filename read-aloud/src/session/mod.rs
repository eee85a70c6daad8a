//! Session coordination for speech synthesis requests.

mod coordinator;
mod state;
mod types;

pub use coordinator::SessionCoordinator;
pub use types::{DispatchOutcome, ServiceHealth};
