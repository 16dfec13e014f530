use dashmap::DashMap;
use friendlychat_core::FeedEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Fan-out of feed events to connected websocket sessions.
/// Maps session id -> sender feeding that session's socket.
#[derive(Default)]
pub struct Feed {
    sessions: DashMap<String, UnboundedSender<String>>,
}

impl Feed {
    /// Registers a new session and returns its id with the receiving end.
    pub fn subscribe(&self) -> (String, UnboundedReceiver<String>) {
        let session_id = Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        self.sessions.insert(session_id.clone(), tx);
        (session_id, rx)
    }

    pub fn unsubscribe(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Sends the event to a single session. False if the session is gone.
    pub fn send_to(&self, session_id: &str, event: &FeedEvent) -> bool {
        let payload = match serde_json::to_string(event) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize feed event");
                return false;
            }
        };
        self.sessions
            .get(session_id)
            .map_or(false, |tx| tx.send(payload).is_ok())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Sends the event to every session, dropping the ones that went away.
    /// Returns how many sessions received it.
    pub fn publish(&self, event: &FeedEvent) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize feed event");
                return 0;
            }
        };

        let mut closed = Vec::new();
        let mut delivered = 0;
        for entry in self.sessions.iter() {
            if entry.value().send(payload.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(entry.key().clone());
            }
        }
        // removal must wait until the iterator has released its shard locks
        for session_id in closed {
            tracing::warn!(%session_id, "dropping closed feed session");
            self.sessions.remove(&session_id);
        }
        delivered
    }
}
