//! # anamsg-interpret — Natural-Language Interpretation Client
//!
//! Async client that sends free-text instructions, together with the
//! schema registry's label tables, to an OpenAI-compatible
//! chat-completions endpoint, and turns the structured answer into a
//! packed message via the codec.
//!
//! The registry export in the prompt and the validation on the way back
//! both read the same tables in `anamsg-core`, so the model can only ever
//! select entries the codec will accept.

pub mod client;
pub mod error;
mod retry;

pub use client::{Interpretation, InterpreterClient};
pub use error::InterpretError;
