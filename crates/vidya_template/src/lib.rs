//! Deterministic prompt templating for the Vidya generation pipeline.
//!
//! Templates are assembled programmatically from a closed set of directive
//! kinds (substitute, conditional, iterate-with-separator, embed-media)
//! rather than parsed from a template language, so every placeholder can
//! be checked against the feature's input schema at development time.
//!
//! Rendering is a pure function: the same input value and template always
//! produce a byte-identical [`PromptPayload`].

mod render;
mod segment;

pub use segment::{Segment, Template, TemplateBuilder};
