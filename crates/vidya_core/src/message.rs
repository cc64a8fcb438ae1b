//! Message types for model requests.

use crate::{Attachment, Role};
use serde::{Deserialize, Serialize};

/// Supported input types to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Image input (PNG, JPEG, WebP, etc.).
    Image(Attachment),
}

/// A multimodal message in a request.
///
/// # Examples
///
/// ```
/// use vidya_core::{Input, Message, Role};
///
/// let message = Message::new(Role::User, vec![Input::Text("Hello!".to_string())]);
///
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.content().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The content of the message (can be multimodal)
    content: Vec<Input>,
}

impl Message {
    /// Creates a new message with the given role and content.
    pub fn new(role: Role, content: Vec<Input>) -> Self {
        Self { role, content }
    }

    /// Creates a user message containing a single text input.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Input::Text(text.into())])
    }
}
