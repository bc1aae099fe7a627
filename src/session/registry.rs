use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::SessionSnapshot;
use super::tracker::SessionTracker;
use crate::error::ConfigurationError;
use crate::issuer::LinkId;
use crate::monitor::ConfirmationSource;

/// Live sessions keyed by link id.
///
/// The registry is only the lookup seam between the HTTP layer and the
/// trackers it has handed out; sessions hold no state in common. Removing
/// a tracker tears it down.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<LinkId, SessionTracker>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the session for `id`, starting its countdown on first view.
    /// Subsequent opens return the already-running session.
    pub async fn open(
        &self,
        id: &LinkId,
        window_secs: u64,
        confirmations: Arc<dyn ConfirmationSource>,
    ) -> Result<SessionSnapshot, ConfigurationError> {
        let mut sessions = self.sessions.lock().await;
        let tracker = match sessions.entry(id.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                entry.insert(SessionTracker::start(id.clone(), window_secs, confirmations)?)
            }
        };
        Ok(tracker.state().await)
    }

    pub async fn snapshot(&self, id: &LinkId) -> Option<SessionSnapshot> {
        let sessions = self.sessions.lock().await;
        match sessions.get(id) {
            Some(tracker) => Some(tracker.state().await),
            None => None,
        }
    }

    /// Forward a confirmation signal to the session for `id`.
    pub async fn confirm(&self, id: &LinkId) -> Option<bool> {
        let sessions = self.sessions.lock().await;
        match sessions.get(id) {
            Some(tracker) => Some(tracker.confirm().await),
            None => None,
        }
    }

    /// Tear down and discard the session for `id`.
    pub async fn close(&self, id: &LinkId) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.remove(id) {
            Some(tracker) => {
                tracker.teardown();
                true
            }
            None => false,
        }
    }
}
