//! Model invocation adapter and provider clients for Vidya.
//!
//! The [`GenerativeModel`] trait abstracts the remote endpoint; the
//! [`ModelInvoker`] wraps any driver and guarantees its structured output
//! conforms to the requested schema before handing it back. The adapter
//! never retries; failures are classified as transient or permanent so
//! callers can decide.

mod config;
mod driver;
pub mod gemini;
mod invoker;

pub use config::ModelConfig;
pub use driver::GenerativeModel;
pub use gemini::GeminiClient;
pub use invoker::ModelInvoker;
