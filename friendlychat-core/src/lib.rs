//! friendlychat-core: types shared by the message store and its clients
//! (message model, HTTP DTOs, feed events, errors, key generation).
//! No I/O in here.

pub mod models;
pub mod protocol;
pub mod error;
pub mod utils;

pub use error::Error;
pub use models::{Message, MessageKind, Sender, ANONYMOUS, LOADING_IMAGE_URL};
pub use protocol::ws::FeedEvent;
pub use protocol::http::{ListMessagesQuery, ListMessagesResponse, PushMessageResponse};
pub use utils::{now_millis, PushIdGenerator, PUSH_ID_LEN};
