//! Unified error type exposed by **`hf-provider-core`**.
//!
//! Backend crates convert their internal errors into one of these variants
//! before handing them to the host framework. Catalog fetch failures never
//! reach this type: they degrade to an empty list instead.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested model id is not part of the enabled catalog subset.
    #[error("no model with id `{id}` found for provider `{provider}`")]
    ModelNotFound { provider: &'static str, id: String },

    /// The model metadata declares no capability this provider can serve.
    #[error("no supported capabilities found for model `{model}`")]
    NoSupportedCapability { model: String },

    /// Entry point exists in the contract but has no implementation.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    /// Failure while serialising or deserialising JSON payloads.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic forwarding of any backend-specific error that doesn’t fit another
    /// category.
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("invalid: {0}")]
    Invalid(String),
}
