//! Typed errors for the harness surface.
//!
//! Most functions return `anyhow::Result` and attach context at the call
//! site. The variants here exist for the failures callers need to match on
//! programmatically (credential checks, timeouts, provider dispatch); they
//! travel inside `anyhow::Error` and come back out with `downcast_ref`.

use thiserror::Error;

/// Errors that callers are expected to inspect.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The selected provider has no API key in the environment
    #[error("missing API key for provider '{provider}': set {key_var}")]
    MissingApiKey {
        /// Provider identifier
        provider: String,
        /// Environment variable that should hold the key
        key_var: String,
    },

    /// An operation required an initialized client
    #[error("automation client is not initialized")]
    NotInitialized,

    /// The AI action did not finish within its deadline
    #[error("AI action timed out after {timeout_ms}ms: {instruction}")]
    ActionTimeout {
        /// Natural-language instruction that was being executed
        instruction: String,
        /// Deadline in milliseconds
        timeout_ms: u64,
    },

    /// Provider is configured but has no wire format implementation
    #[error("provider '{provider}' is not supported for action planning (supported: groq, openai, azure, anthropic)")]
    UnsupportedProvider {
        /// Provider identifier
        provider: String,
    },

    /// Provider API returned a non-success status
    #[error("API error ({provider}): status {status}, {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Provider response could not be turned into a directive
    #[error("failed to parse response from {provider}: {message}")]
    ParseError {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}
