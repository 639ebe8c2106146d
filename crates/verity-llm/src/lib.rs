//! # verity-llm
//!
//! LLM access for the synthesizer node.
//!
//! [`provider::ChatProvider`] is the seam: one prompt in, one completion
//! out. [`groq::GroqProvider`] implements it against Groq's
//! OpenAI-compatible chat completions API, which is where the verdict
//! synthesis actually runs in production.

#![deny(unsafe_code)]

pub mod groq;
pub mod provider;

pub use groq::{GroqConfig, GroqProvider};
pub use provider::{ChatProvider, ProviderError, ProviderResult};
