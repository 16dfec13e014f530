use serde::{Deserialize, Serialize};

/// Placeholder image shown while an attached image is still uploading.
pub const LOADING_IMAGE_URL: &str = "https://www.google.com/images/spin-32.gif";

/// Scheme of image URLs that point into the storage bucket rather than the web.
pub const STORAGE_URL_SCHEME: &str = "gs://";

/// One chat message as exchanged with the message store.
///
/// `id` stays `None` until the store accepts the message and assigns a key.
/// A message normally carries either `text` or `image_url`; nothing here
/// enforces that.
///
/// No `PartialEq`: two messages with the same fields are still two messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

/// What a message shows when rendered. Text wins over an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Image,
    Empty,
}

impl Message {
    pub fn new(
        text: Option<String>,
        name: impl Into<String>,
        photo_url: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id: None,
            text,
            name: name.into(),
            photo_url,
            image_url,
        }
    }

    /// Parses the value stored under `key` and attaches the key as the id.
    pub fn from_snapshot(key: &str, value: serde_json::Value) -> serde_json::Result<Self> {
        let message: Message = serde_json::from_value(value)?;
        Ok(message.with_id(key))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Same as [`Message::set_id`] but consumes and returns the message.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id);
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    pub fn set_photo_url(&mut self, photo_url: Option<String>) {
        self.photo_url = photo_url;
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn set_image_url(&mut self, image_url: Option<String>) {
        self.image_url = image_url;
    }

    pub fn kind(&self) -> MessageKind {
        if self.text.is_some() {
            MessageKind::Text
        } else if self.image_url.is_some() {
            MessageKind::Image
        } else {
            MessageKind::Empty
        }
    }

    pub fn is_loading_placeholder(&self) -> bool {
        self.image_url() == Some(LOADING_IMAGE_URL)
    }

    /// True when the image lives in the storage bucket and needs a download URL first.
    pub fn has_storage_image(&self) -> bool {
        self.image_url()
            .map_or(false, |url| url.starts_with(STORAGE_URL_SCHEME))
    }
}
