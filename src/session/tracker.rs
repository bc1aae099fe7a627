use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::{PaymentSession, SessionSnapshot};
use crate::error::ConfigurationError;
use crate::issuer::LinkId;
use crate::monitor::ConfirmationSource;

/// Drives one [`PaymentSession`] forward in time.
///
/// Two tasks share the session: a once-per-second tick and a watcher on the
/// external confirmation source. Every pass checks for a terminal state
/// before acting, so whichever transition lands first wins and anything
/// scheduled behind it is a no-op. Both tasks are aborted on [`teardown`]
/// and on drop; a discarded tracker can never fire a late transition.
///
/// [`teardown`]: SessionTracker::teardown
#[derive(Debug)]
pub struct SessionTracker {
    session: Arc<Mutex<PaymentSession>>,
    tick_task: JoinHandle<()>,
    confirm_task: JoinHandle<()>,
}

impl SessionTracker {
    pub fn start(
        id: LinkId,
        window_secs: u64,
        confirmations: Arc<dyn ConfirmationSource>,
    ) -> Result<Self, ConfigurationError> {
        let session = Arc::new(Mutex::new(PaymentSession::new(id.clone(), window_secs)?));

        let tick_session = session.clone();
        let tick_task = tokio::spawn(async move {
            loop {
                sleep(Duration::from_secs(1)).await;
                let mut session = tick_session.lock().await;
                if session.state().is_terminal() {
                    break;
                }
                session.tick();
                if session.state().is_terminal() {
                    tracing::debug!("payment {} lapsed after its window", session.id());
                    break;
                }
            }
        });

        let confirm_session = session.clone();
        let confirm_task = tokio::spawn(async move {
            match confirmations.wait_for_confirmation(&id).await {
                Ok(()) => {
                    // confirm() re-checks state, so a session that already
                    // failed or was confirmed out-of-band stays untouched
                    let mut session = confirm_session.lock().await;
                    if session.confirm() {
                        tracing::debug!("payment {} confirmed", session.id());
                    }
                }
                Err(err) => {
                    tracing::warn!("confirmation source failed for payment {}: {}", id, err);
                }
            }
        });

        Ok(Self {
            session,
            tick_task,
            confirm_task,
        })
    }

    pub async fn state(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Inbound confirmation signal. Returns whether it transitioned the
    /// session; signals after a terminal state are ignored.
    pub async fn confirm(&self) -> bool {
        self.session.lock().await.confirm()
    }

    /// Cancel all scheduled work. The session stays readable but can no
    /// longer transition.
    pub fn teardown(&self) {
        self.tick_task.abort();
        self.confirm_task.abort();
    }
}

impl Drop for SessionTracker {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use async_trait::async_trait;

    use super::*;
    use crate::monitor::SimulatedConfirmation;
    use crate::session::SessionState;

    struct NeverConfirm;

    #[async_trait]
    impl ConfirmationSource for NeverConfirm {
        async fn wait_for_confirmation(&self, _id: &LinkId) -> Result<()> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    fn never() -> Arc<dyn ConfirmationSource> {
        Arc::new(NeverConfirm)
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_expires_and_ticking_stops() {
        let tracker = SessionTracker::start(LinkId::generate(), 5, never()).unwrap();

        sleep(Duration::from_millis(5500)).await;
        let snapshot = tracker.state().await;
        assert_eq!(snapshot.state, SessionState::Failed);
        assert_eq!(snapshot.remaining_secs, 0);
        assert_eq!(snapshot.progress, 1.0);

        // Nothing moves after the terminal state, however long we wait
        sleep(Duration::from_secs(30)).await;
        assert_eq!(tracker.state().await, snapshot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_confirmation_freezes_countdown() {
        let source = Arc::new(SimulatedConfirmation::new(Duration::from_millis(2500)));
        let tracker = SessionTracker::start(LinkId::generate(), 10, source).unwrap();

        sleep(Duration::from_millis(3600)).await;
        let snapshot = tracker.state().await;
        assert_eq!(snapshot.state, SessionState::Confirmed);
        assert_eq!(snapshot.remaining_secs, 8);

        sleep(Duration::from_secs(20)).await;
        assert_eq!(tracker.state().await.remaining_secs, 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_confirm_wins_and_later_signals_are_ignored() {
        let tracker = SessionTracker::start(LinkId::generate(), 10, never()).unwrap();

        sleep(Duration::from_millis(3500)).await;
        assert!(tracker.confirm().await);
        assert!(!tracker.confirm().await);

        sleep(Duration::from_secs(3)).await;
        let snapshot = tracker.state().await;
        assert_eq!(snapshot.state, SessionState::Confirmed);
        assert_eq!(snapshot.remaining_secs, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_all_timers() {
        let source = Arc::new(SimulatedConfirmation::new(Duration::from_secs(2)));
        let tracker = SessionTracker::start(LinkId::generate(), 5, source).unwrap();

        sleep(Duration::from_millis(1500)).await;
        tracker.teardown();

        // Neither the tick nor the pending simulated confirmation may fire
        sleep(Duration::from_secs(60)).await;
        let snapshot = tracker.state().await;
        assert_eq!(snapshot.state, SessionState::Waiting);
        assert_eq!(snapshot.remaining_secs, 4);
    }

    #[tokio::test]
    async fn test_zero_window_is_rejected() {
        let err = SessionTracker::start(LinkId::generate(), 0, never()).unwrap_err();
        assert_eq!(err, ConfigurationError::NonPositiveWindow(0));
    }
}
