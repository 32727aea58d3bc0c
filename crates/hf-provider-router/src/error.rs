use hf_provider_core::error::ProviderError;
use reqwest::StatusCode;

/// High-level error type covering every failure mode the router client can hit.
#[derive(Debug, thiserror::Error)]
pub enum HuggingFaceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t (de)serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Hugging Face returned unexpected status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Hugging Face format error: {0}")]
    Format(String),
}

impl From<HuggingFaceError> for ProviderError {
    fn from(value: HuggingFaceError) -> Self {
        ProviderError::Backend(Box::new(value))
    }
}
