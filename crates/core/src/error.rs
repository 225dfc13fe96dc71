//! Error types for the BriefClaw domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all BriefClaw operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Brief validation errors ---
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The model replied, but the reply did not satisfy the output contract
    /// (not a JSON object, or one of the five required keys is missing).
    /// Carries the offending raw text for diagnostics; the service layer is
    /// responsible for converting this into a fallback response.
    #[error("Invalid agent output: {reason}")]
    InvalidAgentOutput { reason: String, raw: String },

    // --- Context store errors ---
    #[error("Context not found: {0}")]
    ContextNotFound(String),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Inbound brief validation failures. Surfaced to the caller as a 4xx
/// before any generation attempt is made.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' is invalid: {reason}")]
    InvalidField { field: String, reason: String },
}
