//! Small host-side driver that runs a prompt against a single concrete
//! [`Provider`].
//!
//! The client is **generic over the provider type `P`**, so no dynamic
//! dispatch leaks into user code for the provider itself. The steps it
//! performs are the ones a host framework goes through for every request:
//!
//! 1. look the model up in the provider's directory,
//! 2. let the provider create an implementation for it,
//! 3. apply the per-request [`ModelConfig`],
//! 4. run the generation.
//!
//! ```rust,ignore
//! let client = ProviderClient::new(provider);
//! let result = client
//!     .generate_text("meta-llama/Llama-3.1-8B-Instruct", "Hello!", ModelConfig::default())
//!     .await?;
//! println!("{}", result.to_text().unwrap_or_default());
//! ```
use std::sync::Arc;

use crate::{
    error::{ProviderError, Result},
    generic::GenerativeAiResult,
    model::{ModelConfig, ModelMetadata},
    provider::Provider,
    template::IntoPrompt,
};

/// A client bound to a single provider.
///
/// Cloning is cheap; the provider sits behind an `Arc`.
#[derive(Debug)]
pub struct ProviderClient<P> {
    provider: Arc<P>,
}

impl<P> Clone for ProviderClient<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P> ProviderClient<P>
where
    P: Provider,
{
    pub fn new(provider: P) -> Self {
        Self::from_arc(Arc::new(provider))
    }

    pub fn from_arc(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Access the underlying provider (e.g. to reach provider-specific
    /// settings).
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Models the provider currently exposes.
    pub async fn models(&self) -> Result<Vec<ModelMetadata>> {
        self.provider.model_directory().list_model_metadata().await
    }

    /// Resolve `model_id`, build the model and run a single generation.
    ///
    /// # Errors
    ///
    /// * [`ProviderError::Invalid`] – the provider is not configured.
    /// * [`ProviderError::ModelNotFound`] – `model_id` is not exposed.
    /// * anything the model returns while generating.
    pub async fn generate_text(
        &self,
        model_id: &str,
        prompt: impl IntoPrompt,
        config: ModelConfig,
    ) -> Result<GenerativeAiResult> {
        if !self.provider.availability().is_configured() {
            return Err(ProviderError::Invalid(format!(
                "provider `{}` is not configured",
                self.provider.metadata().id
            )));
        }

        let metadata = self
            .provider
            .model_directory()
            .get_model_metadata(model_id)
            .await?;

        let mut model = self.provider.create_model(metadata)?;
        model.set_config(config);
        model.generate_text(prompt.into_prompt()).await
    }
}
