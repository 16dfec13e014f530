use serde::{Deserialize, Serialize};

use super::message::{Message, LOADING_IMAGE_URL};

/// Display name used when nobody is signed in.
pub const ANONYMOUS: &str = "anonymous";

/// The signed-in user as seen on outgoing messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Sender {
    pub fn new(name: impl Into<String>, photo_url: Option<String>) -> Self {
        Self { name: name.into(), photo_url }
    }

    pub fn anonymous() -> Self {
        Self::new(ANONYMOUS, None)
    }

    pub fn compose_text(&self, text: impl Into<String>) -> Message {
        Message::new(Some(text.into()), self.name.clone(), self.photo_url.clone(), None)
    }

    pub fn compose_image(&self, image_url: impl Into<String>) -> Message {
        Message::new(None, self.name.clone(), self.photo_url.clone(), Some(image_url.into()))
    }

    /// Image message pushed first to reserve a key; replaced once the upload has a URL.
    pub fn compose_loading_image(&self) -> Message {
        self.compose_image(LOADING_IMAGE_URL)
    }
}

impl Default for Sender {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageKind;

    #[test]
    fn anonymous_sender_has_no_photo() {
        let s = Sender::default();
        assert_eq!(s.name, ANONYMOUS);
        assert!(s.photo_url.is_none());
    }

    #[test]
    fn composed_text_carries_sender_details() {
        let s = Sender::new("Alice", Some("https://example.com/a.png".to_string()));
        let m = s.compose_text("hello");
        assert_eq!(m.text(), Some("hello"));
        assert_eq!(m.name(), "Alice");
        assert_eq!(m.photo_url(), Some("https://example.com/a.png"));
        assert!(m.image_url().is_none());
        assert!(m.id().is_none());
    }

    #[test]
    fn loading_image_is_an_image_without_text() {
        let m = Sender::anonymous().compose_loading_image();
        assert_eq!(m.kind(), MessageKind::Image);
        assert!(m.is_loading_placeholder());
        assert!(m.text().is_none());
    }
}
