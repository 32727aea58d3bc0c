mod directory;
mod text_generation;

pub use directory::*;
pub use text_generation::*;

use crate::{
    error::Result,
    model::{ModelMetadata, ProviderMetadata},
};

/// Reports whether a provider has everything it needs (usually credentials)
/// to serve requests.
pub trait ProviderAvailability: Send + Sync {
    fn is_configured(&self) -> bool;
}

/// A **provider** bundles the pieces the host framework asks for when it
/// routes a request: identity, availability, the model directory and a
/// factory for concrete model implementations.
///
/// Provider crates implement this on their adapter type; the host never sees
/// transport details.
pub trait Provider: Send + Sync {
    fn metadata(&self) -> &ProviderMetadata;

    fn availability(&self) -> &dyn ProviderAvailability;

    fn model_directory(&self) -> &dyn ModelMetadataDirectory;

    /// Pick an implementation for `metadata`.
    ///
    /// # Errors
    ///
    /// [`ProviderError::NoSupportedCapability`](crate::error::ProviderError)
    /// when none of the declared capabilities is served by this provider.
    fn create_model(&self, metadata: ModelMetadata) -> Result<Box<dyn TextGenerationModel>>;
}
