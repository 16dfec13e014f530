use serde::{Deserialize, Serialize};

use crate::models::Message;
/*
    dto for the message store http surface; request bodies are plain Message json
*/

// Push
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessageResponse {
    pub message: Message,
}

// List messages (ordered by key, oldest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesResponse {
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesQuery {
    /// Only the most recent `limit` messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
