pub mod ws;
pub mod http;

pub use ws::FeedEvent;
pub use http::{ListMessagesQuery, ListMessagesResponse, PushMessageResponse};
