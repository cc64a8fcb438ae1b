//! Rendered prompt payload.

use crate::Attachment;
use serde::{Deserialize, Serialize};

/// The product of template rendering: instruction text plus the ordered
/// media attachments to send alongside it.
///
/// Rendering is deterministic, so equal inputs always produce payloads
/// that compare equal (and serialize byte-identically).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PromptPayload {
    /// The rendered instruction text
    text: String,
    /// Ordered media attachments referenced by the template
    attachments: Vec<Attachment>,
}

impl PromptPayload {
    /// Creates a new payload from rendered text and attachments.
    pub fn new(text: String, attachments: Vec<Attachment>) -> Self {
        Self { text, attachments }
    }

    /// True when the payload carries no attachments.
    pub fn is_text_only(&self) -> bool {
        self.attachments.is_empty()
    }
}
