//! Core data types for the Vidya generation pipeline.
//!
//! This crate provides the foundation data types shared by the schema,
//! template, model, and flow crates.

mod media;
mod message;
mod observability;
mod payload;
mod request;
mod role;

pub use media::{Attachment, MediaSource};
pub use message::{Input, Message};
pub use observability::init_tracing;
pub use payload::PromptPayload;
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError, GenerateResponse, Output,
};
pub use role::Role;
