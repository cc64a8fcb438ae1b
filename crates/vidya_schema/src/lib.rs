//! Typed request/response schemas for the Vidya generation pipeline.
//!
//! A [`Schema`] is a closed description of a record's fields, used twice
//! per generation: once to validate caller input before the model is
//! invoked, and once to validate the model's structured output before it
//! is surfaced. Schemas are pure data; validation is deterministic.

mod descriptor;
mod schema;
mod validate;

pub use schema::{Field, FieldType, Schema};
