//! LLM generation client for BriefClaw.
//!
//! The client is a two-variant capability decided once at construction:
//! [`GenerationClient::Available`] wraps a live [`AnthropicClient`],
//! [`GenerationClient::Unavailable`] means no credential was configured.
//! Absence is a mode, not an error — callers branch on availability and use
//! the mock strategy when the client is unavailable.

pub mod anthropic;
pub mod client;

pub use anthropic::AnthropicClient;
pub use client::GenerationClient;
