//! Session coordinator: one active synthesis session at a time.
//!
//! A new dispatch replaces the tracked session without cancelling the request
//! already in flight; when that older request finishes, its reply is reported
//! to its own caller but leaves the newer session alone. Stopping goes through
//! the service's stop endpoint, never by aborting the local request.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tts_client::{StopAck, SynthesisReply, SynthesisRequest, TtsTransport};

use super::state::SessionState;
use super::types::{DispatchOutcome, DispatchPhase, ServiceHealth, SynthesisResult};
use crate::error::{ReadAloudError, Result};

/// Owns the session state and talks to the service through a transport.
pub struct SessionCoordinator {
    transport: Arc<dyn TtsTransport>,
    state: Mutex<SessionState>,
}

/// A dispatch running in the background.
pub struct DispatchHandle {
    session_id: String,
    task: JoinHandle<DispatchOutcome>,
}

impl DispatchHandle {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Wait for the dispatch to finish.
    pub async fn outcome(self) -> DispatchOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => DispatchOutcome::Failed(ReadAloudError::Transport {
                message: format!("Dispatch task failed: {}", err),
                status_code: None,
            }),
        }
    }
}

impl SessionCoordinator {
    pub fn new(transport: Arc<dyn TtsTransport>) -> Self {
        Self {
            transport,
            state: Mutex::new(SessionState::default()),
        }
    }

    // The lock is never held across an await
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Session currently considered active, if any.
    pub fn active_session(&self) -> Option<String> {
        self.state().active().map(str::to_string)
    }

    /// Phase of the most recent dispatch.
    pub fn phase(&self) -> DispatchPhase {
        self.state().phase()
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Send `request`. The session is recorded as soon as this is called; the
    /// returned future finishes when the service is done with it.
    pub fn dispatch(
        self: &Arc<Self>,
        request: SynthesisRequest,
    ) -> impl Future<Output = DispatchOutcome> + Send + 'static {
        self.begin(&request.session_id);
        let coordinator = Arc::clone(self);
        async move { coordinator.complete(request).await }
    }

    /// Run `dispatch` on its own task.
    pub fn spawn_dispatch(self: &Arc<Self>, request: SynthesisRequest) -> DispatchHandle {
        let session_id = request.session_id.clone();
        let task = tokio::spawn(self.dispatch(request));
        DispatchHandle { session_id, task }
    }

    fn begin(&self, session_id: &str) {
        let superseded = self.state().begin(session_id);
        match superseded {
            Some(previous) => info!("Session {} supersedes {}", session_id, previous),
            None => info!("Dispatching session {}", session_id),
        }
    }

    async fn complete(&self, request: SynthesisRequest) -> DispatchOutcome {
        let dispatched = request.session_id.as_str();

        match self.transport.synthesize(&request).await {
            Ok(reply) => self.settle_reply(dispatched, reply),
            Err(err) => {
                warn!("Session {} failed: {}", dispatched, err);
                if !self.state().settle(&[dispatched], DispatchPhase::Failed) {
                    debug!("Session {} was no longer active", dispatched);
                }
                DispatchOutcome::Failed(err.into())
            }
        }
    }

    fn settle_reply(&self, dispatched: &str, reply: SynthesisReply) -> DispatchOutcome {
        // The service may rename the session; its id is the one that counts
        let remote = reply
            .session_id
            .clone()
            .unwrap_or_else(|| dispatched.to_string());
        let ids = [dispatched, remote.as_str()];

        let mut state = self.state();
        let stopped = state.was_stopped(&ids);

        let outcome = match reply.success {
            Some(true) => {
                let result = SynthesisResult {
                    success: true,
                    saved_as: reply.saved_as,
                    voice: reply.voice,
                    paragraphs: reply.paragraphs,
                    duration_sec: reply.duration_sec,
                    session_id: Some(remote.clone()),
                };
                if stopped {
                    DispatchOutcome::Stopped {
                        session_id: remote.clone(),
                        result: Some(result),
                    }
                } else {
                    DispatchOutcome::Completed(result)
                }
            }
            Some(false) if stopped => DispatchOutcome::Stopped {
                session_id: remote.clone(),
                result: None,
            },
            Some(false) => DispatchOutcome::Failed(ReadAloudError::ServiceReportedFailure(
                reply
                    .error
                    .unwrap_or_else(|| "TTS processing failed".to_string()),
            )),
            None => DispatchOutcome::Failed(ReadAloudError::UnexpectedResponseShape(
                "reply carries no success flag".to_string(),
            )),
        };

        let cleared = state.settle(&ids, outcome.phase());
        drop(state);

        if cleared {
            info!("Session {} finished: {:?}", remote, outcome.phase());
        } else {
            debug!(
                "Late reply for session {} ({:?}); a newer session is tracked",
                remote,
                outcome.phase()
            );
        }
        outcome
    }

    /// Ask the service to stop the active session.
    ///
    /// Any answer from the service ends the session locally. A transport failure
    /// leaves it active, since it may still be playing.
    pub async fn stop(&self) -> Result<StopAck> {
        let session_id = self
            .active_session()
            .ok_or(ReadAloudError::NoActiveSession)?;
        info!("Stopping session {}", session_id);

        let ack = self.transport.stop(&session_id).await.map_err(|err| {
            warn!("Stop for session {} failed: {}", session_id, err);
            ReadAloudError::from(err)
        })?;

        if !ack.success {
            info!("Service declined stop for {}: {}", session_id, ack.message);
        }
        self.state().stop_answered(&session_id, ack.success);
        Ok(ack)
    }

    /// Ask the service how it is doing. Never touches session state.
    pub async fn health_check(&self) -> ServiceHealth {
        match self.transport.health().await {
            Ok(report) if report.is_healthy() => ServiceHealth::Online(report),
            Ok(report) => ServiceHealth::Degraded(report),
            Err(err) => ServiceHealth::Offline(err.to_string()),
        }
    }
}
