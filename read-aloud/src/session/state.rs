//! The coordinator's single slot of shared session state.
//!
//! Every mutation names the session ids it concerns and only takes effect while
//! those ids are still current, so a late reply for a superseded or stopped
//! session can never disturb a newer one.

use std::collections::HashSet;

use super::types::DispatchPhase;

#[derive(Debug, Default)]
pub struct SessionState {
    /// Session considered to be playing, if any
    active: Option<String>,
    /// Most recent dispatch and its phase
    latest: Option<String>,
    phase: DispatchPhase,
    /// Dispatches whose reply hasn't been settled yet
    pending: HashSet<String>,
    /// Pending sessions the service acknowledged stopping
    stopped: HashSet<String>,
}

impl SessionState {
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn phase(&self) -> DispatchPhase {
        self.phase
    }

    /// Track a new dispatch, replacing whatever was active. Returns the superseded id.
    pub fn begin(&mut self, session_id: &str) -> Option<String> {
        self.latest = Some(session_id.to_string());
        self.phase = DispatchPhase::Dispatching;
        self.pending.insert(session_id.to_string());
        self.active.replace(session_id.to_string())
    }

    /// Record the end of a dispatch known by any of `ids`.
    ///
    /// Clears the active session only if it is one of `ids`. Returns whether it did.
    /// Forgets any stop recorded for `ids`, so check `was_stopped` first.
    pub fn settle(&mut self, ids: &[&str], phase: DispatchPhase) -> bool {
        for id in ids {
            self.pending.remove(*id);
            self.stopped.remove(*id);
        }

        if Self::is_one_of(self.latest.as_deref(), ids) && self.phase == DispatchPhase::Dispatching
        {
            self.phase = phase;
        }

        if Self::is_one_of(self.active.as_deref(), ids) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Record the service's answer to a stop for `session_id`.
    ///
    /// Any answer ends the session locally; only a successful one marks it stopped.
    pub fn stop_answered(&mut self, session_id: &str, success: bool) {
        if self.active.as_deref() == Some(session_id) {
            self.active = None;
        }
        if success {
            if self.pending.contains(session_id) {
                self.stopped.insert(session_id.to_string());
            }
            if self.latest.as_deref() == Some(session_id)
                && self.phase == DispatchPhase::Dispatching
            {
                self.phase = DispatchPhase::Stopped;
            }
        }
    }

    /// Whether a stop was acknowledged for any of `ids`.
    pub fn was_stopped(&self, ids: &[&str]) -> bool {
        ids.iter().any(|id| self.stopped.contains(*id))
    }

    fn is_one_of(current: Option<&str>, ids: &[&str]) -> bool {
        current.is_some_and(|current| ids.contains(&current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_settle() {
        let mut state = SessionState::default();
        assert_eq!(state.phase(), DispatchPhase::Idle);

        assert_eq!(state.begin("a"), None);
        assert_eq!(state.active(), Some("a"));
        assert_eq!(state.phase(), DispatchPhase::Dispatching);

        assert!(state.settle(&["a"], DispatchPhase::Completed));
        assert_eq!(state.active(), None);
        assert_eq!(state.phase(), DispatchPhase::Completed);
    }

    #[test]
    fn test_stale_settle_leaves_newer_session() {
        let mut state = SessionState::default();
        state.begin("a");
        assert_eq!(state.begin("b"), Some("a".to_string()));

        assert!(!state.settle(&["a"], DispatchPhase::Completed));
        assert_eq!(state.active(), Some("b"));
        assert_eq!(state.phase(), DispatchPhase::Dispatching);
    }

    #[test]
    fn test_settle_matches_rewritten_id() {
        let mut state = SessionState::default();
        state.begin("local");
        assert!(state.settle(&["local", "remote"], DispatchPhase::Failed));

        state.begin("remote");
        assert!(state.settle(&["local", "remote"], DispatchPhase::Completed));
    }

    #[test]
    fn test_stop_answer() {
        let mut state = SessionState::default();
        state.begin("a");
        state.stop_answered("a", true);
        assert_eq!(state.active(), None);
        assert_eq!(state.phase(), DispatchPhase::Stopped);
        assert!(state.was_stopped(&["a"]));

        // The late reply doesn't turn the stopped session into a completed one
        assert!(!state.settle(&["a"], DispatchPhase::Completed));
        assert_eq!(state.phase(), DispatchPhase::Stopped);
    }

    #[test]
    fn test_declined_stop_still_ends_session() {
        let mut state = SessionState::default();
        state.begin("a");
        state.stop_answered("a", false);
        assert_eq!(state.active(), None);
        assert!(!state.was_stopped(&["a"]));
        assert_eq!(state.phase(), DispatchPhase::Dispatching);
    }

    #[test]
    fn test_stop_answer_for_replaced_session() {
        let mut state = SessionState::default();
        state.begin("a");
        state.begin("b");
        state.stop_answered("a", true);
        assert_eq!(state.active(), Some("b"));
        assert_eq!(state.phase(), DispatchPhase::Dispatching);
    }

    #[test]
    fn test_every_stop_is_remembered_until_settled() {
        let mut state = SessionState::default();
        state.begin("a");
        state.stop_answered("a", true);
        state.begin("b");
        state.stop_answered("b", true);

        assert!(state.was_stopped(&["a"]));
        assert!(state.was_stopped(&["b"]));

        state.settle(&["a"], DispatchPhase::Completed);
        assert!(!state.was_stopped(&["a"]));
        assert!(state.was_stopped(&["b"]));

        state.settle(&["b"], DispatchPhase::Completed);
        assert!(state.pending.is_empty());
        assert!(state.stopped.is_empty());
    }

    #[test]
    fn test_stop_for_settled_session_is_not_kept() {
        let mut state = SessionState::default();
        state.begin("a");
        state.settle(&["a"], DispatchPhase::Completed);
        state.stop_answered("a", true);
        assert!(!state.was_stopped(&["a"]));
        assert!(state.stopped.is_empty());
        assert_eq!(state.phase(), DispatchPhase::Completed);
    }
}
