use serde::Serialize;

use crate::error::ConfigurationError;
use crate::issuer::LinkId;

/// Lifecycle of one payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Waiting,
    Confirmed,
    Failed,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

/// One payment attempt, from the first view of its link until it resolves.
///
/// Transitions are one-directional: `Waiting` moves to `Confirmed` when an
/// external confirmation arrives, or to `Failed` when the window lapses.
/// Nothing leaves a terminal state; the countdown freezes there and late
/// confirmation signals are dropped silently.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    id: LinkId,
    state: SessionState,
    window_secs: u64,
    remaining_secs: u64,
}

impl PaymentSession {
    pub fn new(id: LinkId, window_secs: u64) -> Result<Self, ConfigurationError> {
        if window_secs == 0 {
            return Err(ConfigurationError::NonPositiveWindow(window_secs));
        }
        Ok(Self {
            id,
            state: SessionState::Waiting,
            window_secs,
            remaining_secs: window_secs,
        })
    }

    pub fn id(&self) -> &LinkId {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Advance the countdown by one second.
    ///
    /// No-op once the session is terminal. The transition to `Failed` fires
    /// exactly once, on the tick that exhausts the window.
    pub fn tick(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = SessionState::Failed;
        }
    }

    /// Apply an external confirmation signal.
    ///
    /// Returns whether the signal transitioned the session. Signals arriving
    /// after a terminal state are ignored.
    pub fn confirm(&mut self) -> bool {
        if self.state != SessionState::Waiting {
            return false;
        }
        self.state = SessionState::Confirmed;
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            formatted_remaining: format_remaining(self.remaining_secs),
            progress: self.progress(),
        }
    }

    fn progress(&self) -> f64 {
        let elapsed = (self.window_secs - self.remaining_secs) as f64;
        (elapsed / self.window_secs as f64).clamp(0.0, 1.0)
    }
}

/// Point-in-time view of a session, as rendered by the payment widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub remaining_secs: u64,
    pub formatted_remaining: String,
    pub progress: f64,
}

/// `minutes:seconds` with seconds zero-padded, e.g. 215 → "3:35".
pub fn format_remaining(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub mod registry;
pub mod tracker;

pub use registry::SessionRegistry;
pub use tracker::SessionTracker;

#[cfg(test)]
mod tests {
    use super::*;

    fn session(window_secs: u64) -> PaymentSession {
        PaymentSession::new(LinkId::generate(), window_secs).unwrap()
    }

    #[test]
    fn test_starts_waiting_with_full_window() {
        let session = session(900);
        assert_eq!(session.state(), SessionState::Waiting);
        assert_eq!(session.remaining_secs(), 900);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let err = PaymentSession::new(LinkId::generate(), 0).unwrap_err();
        assert_eq!(err, ConfigurationError::NonPositiveWindow(0));
    }

    #[test]
    fn test_countdown_exhaustion_fails_exactly_once() {
        let mut session = session(900);
        for _ in 0..899 {
            session.tick();
        }
        assert_eq!(session.state(), SessionState::Waiting);
        assert_eq!(session.remaining_secs(), 1);

        session.tick();
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.remaining_secs(), 0);

        // A stray extra tick must not move anything
        session.tick();
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn test_confirm_while_waiting_freezes_countdown() {
        let mut session = session(900);
        for _ in 0..30 {
            session.tick();
        }
        assert_eq!(session.remaining_secs(), 870);

        assert!(session.confirm());
        assert_eq!(session.state(), SessionState::Confirmed);

        // Ticks already queued behind the confirmation are no-ops
        session.tick();
        assert_eq!(session.state(), SessionState::Confirmed);
        assert_eq!(session.remaining_secs(), 870);
    }

    #[test]
    fn test_duplicate_confirm_is_ignored() {
        let mut session = session(60);
        assert!(session.confirm());
        assert!(!session.confirm());
        assert_eq!(session.state(), SessionState::Confirmed);
    }

    #[test]
    fn test_late_confirm_after_expiry_is_ignored() {
        let mut session = session(3);
        for _ in 0..3 {
            session.tick();
        }
        assert_eq!(session.state(), SessionState::Failed);

        assert!(!session.confirm());
        assert_eq!(session.state(), SessionState::Failed);
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(215), "3:35");
        assert_eq!(format_remaining(65), "1:05");
        assert_eq!(format_remaining(900), "15:00");
        assert_eq!(format_remaining(0), "0:00");
    }

    #[test]
    fn test_progress_runs_from_zero_to_one() {
        let mut session = session(900);
        assert_eq!(session.snapshot().progress, 0.0);

        for _ in 0..225 {
            session.tick();
        }
        assert_eq!(session.snapshot().progress, 0.25);

        for _ in 0..675 {
            session.tick();
        }
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.snapshot().progress, 1.0);
    }

    #[test]
    fn test_snapshot_serializes_for_the_widget() {
        let session = session(900);
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["state"], "waiting");
        assert_eq!(json["remainingSecs"], 900);
        assert_eq!(json["formattedRemaining"], "15:00");
        assert_eq!(json["progress"], 0.0);
    }

    #[test]
    fn test_snapshot_carries_formatted_remaining() {
        let mut session = session(900);
        for _ in 0..685 {
            session.tick();
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.remaining_secs, 215);
        assert_eq!(snapshot.formatted_remaining, "3:35");
    }
}
