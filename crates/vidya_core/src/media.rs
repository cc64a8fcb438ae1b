//! Media source types for multimodal content.

use serde::{Deserialize, Serialize};

/// Where media content is sourced from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaSource {
    /// URL to fetch the content from
    Url(String),
    /// Base64-encoded content
    Base64(String),
    /// Raw binary data
    Binary(Vec<u8>),
}

/// A media attachment handed through the pipeline.
///
/// Attachments supplied by the caller are forwarded to the model
/// unmodified and in their original order.
///
/// # Examples
///
/// ```
/// use vidya_core::{Attachment, MediaSource};
///
/// let photo = Attachment::new(
///     Some("image/jpeg".to_string()),
///     MediaSource::Base64("...".to_string()),
/// );
/// assert_eq!(photo.mime().as_deref(), Some("image/jpeg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Attachment {
    /// MIME type, e.g. "image/png" or "image/jpeg"
    mime: Option<String>,
    /// Media source (URL, base64, or raw bytes)
    source: MediaSource,
}

impl Attachment {
    /// Creates a new attachment with the given MIME type and source.
    pub fn new(mime: Option<String>, source: MediaSource) -> Self {
        Self { mime, source }
    }
}
