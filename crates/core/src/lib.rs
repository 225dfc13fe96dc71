//! # BriefClaw Core
//!
//! Domain types and error definitions for the BriefClaw campaign agent.
//! This crate has **zero framework dependencies** — it defines the domain model
//! that all other crates implement against.
//!
//! The model follows the brief → response → context pipeline: a validated
//! [`CampaignBrief`] goes in, a structurally valid [`AgentResponse`] comes out
//! (no matter which generation strategy produced it), and one [`MemoryContext`]
//! audit record is kept per invocation.

pub mod brief;
pub mod context;
pub mod error;
pub mod response;

// Re-export key types at crate root for ergonomics
pub use brief::CampaignBrief;
pub use context::{ContextStatus, InteractionRecord, MemoryContext};
pub use error::{Error, ProviderError, Result, ValidationError};
pub use response::{AgentResponse, EmailCopy};
