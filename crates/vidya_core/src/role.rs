//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Roles are shared across modalities (text, image, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}
