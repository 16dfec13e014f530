pub mod message;
pub mod sender;

pub use message::{Message, MessageKind, LOADING_IMAGE_URL};
pub use sender::{Sender, ANONYMOUS};
