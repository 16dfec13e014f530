/* Events pushed to feed subscribers over the websocket.
    FeedEvent is the { type, payload } envelope:
    ChildAdded -> a message was stored under a new key
    ChildChanged -> the value under an existing key was replaced (e.g. loading image swapped for the real one)
    Error -> errors not tied to a particular write (e.g. a client writing to the read-only feed)
*/
use serde::{Deserialize, Serialize};

use crate::{error::Error, models::Message};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum FeedEvent {
    #[serde(rename = "childAdded")]
    ChildAdded(Message),
    #[serde(rename = "childChanged")]
    ChildChanged(Message),
    #[serde(rename = "error")]
    Error(Error),
}

impl FeedEvent {
    /// The message carried by the event, if any.
    pub fn message(&self) -> Option<&Message> {
        match self {
            FeedEvent::ChildAdded(m) | FeedEvent::ChildChanged(m) => Some(m),
            FeedEvent::Error(_) => None,
        }
    }
}
