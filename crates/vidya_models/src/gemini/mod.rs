//! Gemini REST client.
//!
//! Talks to the `models/{model}:generateContent` endpoint directly over
//! reqwest, requesting JSON output constrained by the caller's schema
//! descriptor.

mod client;
mod conversions;
mod dto;

pub use client::GeminiClient;
pub use dto::{GeminiContent, GeminiPart, GeminiRequest, GeminiResponse};
