use std::collections::HashSet;

use hf_provider_core::{
    error::ProviderError,
    model::{CapabilityType, ModelMetadata, OptionName},
    provider::{DirectoryFuture, ModelMetadataDirectory},
};

use crate::{
    catalog::{ModelCatalog, ModelRecord},
    settings::{PROVIDER_ID, SettingsStore},
};

/// Capabilities declared for every router model.
pub const MODEL_CAPABILITIES: [CapabilityType; 2] =
    [CapabilityType::TextGeneration, CapabilityType::ChatHistory];

/// Options accepted by the chat completions endpoint.
pub const MODEL_OPTIONS: [OptionName; 9] = [
    OptionName::SystemInstruction,
    OptionName::MaxTokens,
    OptionName::Temperature,
    OptionName::TopP,
    OptionName::StopSequences,
    OptionName::FrequencyPenalty,
    OptionName::PresencePenalty,
    OptionName::InputModalities,
    OptionName::OutputModalities,
];

pub(crate) fn model_metadata(record: &ModelRecord) -> ModelMetadata {
    ModelMetadata::new(record.id.clone())
        .with_name(record.name.clone())
        .with_capabilities(MODEL_CAPABILITIES.to_vec())
        .with_options(MODEL_OPTIONS.to_vec())
}

/// Directory restricted to the models the operator enabled.
///
/// Enabled ids missing from the current catalog are not listed; the settings
/// page reports them as stale instead.
#[derive(Clone)]
pub struct HuggingFaceModelDirectory {
    settings: SettingsStore,
    catalog: ModelCatalog,
}

impl HuggingFaceModelDirectory {
    pub fn new(settings: SettingsStore, catalog: ModelCatalog) -> Self {
        Self { settings, catalog }
    }

    async fn enabled_metadata(&self) -> Vec<ModelMetadata> {
        let enabled: HashSet<String> = self.settings.enabled_models().into_iter().collect();
        if enabled.is_empty() {
            return Vec::new();
        }

        let api_key = self.settings.active_api_key();
        self.catalog
            .fetch_all(&api_key)
            .await
            .iter()
            .filter(|record| enabled.contains(&record.id))
            .map(model_metadata)
            .collect()
    }
}

impl ModelMetadataDirectory for HuggingFaceModelDirectory {
    fn list_model_metadata(&self) -> DirectoryFuture<'_, Vec<ModelMetadata>> {
        Box::pin(async move { Ok(self.enabled_metadata().await) })
    }

    fn has_model_metadata<'a>(&'a self, model_id: &'a str) -> DirectoryFuture<'a, bool> {
        Box::pin(async move {
            Ok(self
                .enabled_metadata()
                .await
                .iter()
                .any(|meta| meta.id == model_id))
        })
    }

    fn get_model_metadata<'a>(&'a self, model_id: &'a str) -> DirectoryFuture<'a, ModelMetadata> {
        Box::pin(async move {
            self.enabled_metadata()
                .await
                .into_iter()
                .find(|meta| meta.id == model_id)
                .ok_or_else(|| ProviderError::ModelNotFound {
                    provider: PROVIDER_ID,
                    id: model_id.to_owned(),
                })
        })
    }
}
