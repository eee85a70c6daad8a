//! Mock TTS transport for testing
//!
//! Replies can be scripted per call, and synthesis can be held open per session
//! so tests can interleave completions, supersedes and stops deterministically.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::error::Result;
use crate::protocol::{HealthReport, StopAck, SynthesisReply, SynthesisRequest};
use crate::transport::TtsTransport;

/// A mock transport that records every call
pub struct MockTransport {
    /// Replies for upcoming synthesize calls, in order (empty = echo success)
    synthesize_replies: Mutex<VecDeque<Result<SynthesisReply>>>,
    /// Reply for every stop call (None = acknowledge)
    stop_reply: Mutex<Option<Result<StopAck>>>,
    /// Reply for every health call
    health_reply: Mutex<Result<HealthReport>>,
    /// Whether synthesize waits for `release`
    gated: bool,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    /// Prefix the echoed session id, as a service that rewrites ids would
    session_prefix: Option<String>,
    synthesize_calls: Mutex<Vec<SynthesisRequest>>,
    stop_calls: Mutex<Vec<String>>,
    health_calls: AtomicUsize,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a transport that answers everything successfully
    pub fn new() -> Self {
        Self {
            synthesize_replies: Mutex::new(VecDeque::new()),
            stop_reply: Mutex::new(None),
            health_reply: Mutex::new(Ok(HealthReport::new("healthy"))),
            gated: false,
            gates: Mutex::new(HashMap::new()),
            session_prefix: None,
            synthesize_calls: Mutex::new(Vec::new()),
            stop_calls: Mutex::new(Vec::new()),
            health_calls: AtomicUsize::new(0),
        }
    }

    /// Hold every synthesize call until `release` is called for its session
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    /// Queue a reply; synthesize calls take queued replies in order, then echo
    pub fn with_synthesize_reply(self, reply: Result<SynthesisReply>) -> Self {
        self.synthesize_replies.lock().unwrap().push_back(reply);
        self
    }

    /// Answer every stop call with `reply`
    pub fn with_stop_reply(self, reply: Result<StopAck>) -> Self {
        *self.stop_reply.lock().unwrap() = Some(reply);
        self
    }

    /// Answer every health call with `reply`
    pub fn with_health_reply(self, reply: Result<HealthReport>) -> Self {
        *self.health_reply.lock().unwrap() = reply;
        self
    }

    /// Echo session ids back as `<prefix><id>`
    pub fn rewriting_session_ids(mut self, prefix: &str) -> Self {
        self.session_prefix = Some(prefix.to_string());
        self
    }

    /// Let the held synthesize call for `session_id` finish (or pre-release it)
    pub fn release(&self, session_id: &str) {
        self.gate(session_id).notify_one();
    }

    /// Requests seen by synthesize, in call order
    pub fn synthesize_calls(&self) -> Vec<SynthesisRequest> {
        self.synthesize_calls.lock().unwrap().clone()
    }

    /// Session ids seen by stop, in call order
    pub fn stop_calls(&self) -> Vec<String> {
        self.stop_calls.lock().unwrap().clone()
    }

    /// Number of health checks performed
    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    fn gate(&self, session_id: &str) -> Arc<Notify> {
        self.gates
            .lock()
            .unwrap()
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    fn echo(&self, request: &SynthesisRequest) -> SynthesisReply {
        let paragraphs = request
            .text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .count()
            .max(1) as u32;
        let session_id = match &self.session_prefix {
            Some(prefix) => format!("{}{}", prefix, request.session_id),
            None => request.session_id.clone(),
        };

        SynthesisReply::completed(
            format!("tts_{}_mock.wav", request.voice),
            request.voice.clone(),
            paragraphs,
            1.5 * f64::from(paragraphs),
            session_id,
        )
    }
}

#[async_trait]
impl TtsTransport for MockTransport {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisReply> {
        self.synthesize_calls.lock().unwrap().push(request.clone());

        if self.gated {
            let gate = self.gate(&request.session_id);
            gate.notified().await;
        }

        let scripted = self.synthesize_replies.lock().unwrap().pop_front();
        match scripted {
            Some(reply) => reply,
            None => Ok(self.echo(request)),
        }
    }

    async fn stop(&self, session_id: &str) -> Result<StopAck> {
        self.stop_calls.lock().unwrap().push(session_id.to_string());

        let scripted = self.stop_reply.lock().unwrap().clone();
        match scripted {
            Some(reply) => reply,
            None => Ok(StopAck::new(true, format!("Stopped session {}", session_id))),
        }
    }

    async fn health(&self) -> Result<HealthReport> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.health_reply.lock().unwrap().clone();
        reply
    }

    fn endpoint(&self) -> &str {
        "mock://tts"
    }
}
