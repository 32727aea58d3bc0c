use std::sync::Arc;

use hf_provider_core::{
    error::{ProviderError, Result},
    model::{AuthenticationMethod, CapabilityType, ModelMetadata, ProviderKind, ProviderMetadata},
    provider::{ModelMetadataDirectory, Provider, ProviderAvailability, TextGenerationModel},
};

use crate::{
    HuggingFaceProvider,
    settings::{PROVIDER_ID, SettingsStore},
    text_generation::HuggingFaceTextGenerationModel,
};

pub static PROVIDER_METADATA: ProviderMetadata = ProviderMetadata {
    id: PROVIDER_ID,
    name: "Hugging Face",
    kind: ProviderKind::Cloud,
    credentials_url: "https://huggingface.co/settings/tokens",
    authentication: AuthenticationMethod::ApiKey,
};

/// Configured as soon as any key source yields a non-empty key.
#[derive(Clone, Debug)]
pub struct HuggingFaceAvailability {
    settings: SettingsStore,
}

impl HuggingFaceAvailability {
    pub fn new(settings: SettingsStore) -> Self {
        Self { settings }
    }
}

impl ProviderAvailability for HuggingFaceAvailability {
    fn is_configured(&self) -> bool {
        !self.settings.active_api_key().is_empty()
    }
}

impl Provider for HuggingFaceProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &PROVIDER_METADATA
    }

    fn availability(&self) -> &dyn ProviderAvailability {
        &self.availability
    }

    fn model_directory(&self) -> &dyn ModelMetadataDirectory {
        &self.directory
    }

    fn create_model(&self, metadata: ModelMetadata) -> Result<Box<dyn TextGenerationModel>> {
        if !metadata.supports(CapabilityType::TextGeneration) {
            return Err(ProviderError::NoSupportedCapability { model: metadata.id });
        }

        Ok(Box::new(HuggingFaceTextGenerationModel::new(
            metadata,
            Arc::clone(&self.client),
            self.settings.clone(),
        )))
    }
}
