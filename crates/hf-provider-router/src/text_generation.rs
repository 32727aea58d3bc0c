//! Chat-completion backed text generation.
//!
//! Every router model speaks the OpenAI-compatible `/chat/completions`
//! endpoint. On top of the plain mapping this model appends the routing
//! strategy to the model id and bills the configured organization.
use std::{future::Future, pin::Pin, sync::Arc};

use hf_provider_core::{
    error::{ProviderError, Result},
    generic::{GenerativeAiResult, Message},
    model::{ModelConfig, ModelMetadata},
    provider::{GenerativeAiResultStream, TextGenerationModel},
};

use crate::{api_v1::ChatCompletionRequest, client::HuggingFaceClient, settings::SettingsStore};

pub struct HuggingFaceTextGenerationModel {
    metadata: ModelMetadata,
    config: ModelConfig,
    client: Arc<HuggingFaceClient>,
    settings: SettingsStore,
}

impl HuggingFaceTextGenerationModel {
    pub fn new(
        metadata: ModelMetadata,
        client: Arc<HuggingFaceClient>,
        settings: SettingsStore,
    ) -> Self {
        Self {
            metadata,
            config: ModelConfig::default(),
            client,
            settings,
        }
    }

    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Model id as sent upstream: `{id}:{routing strategy}`.
    pub fn routed_model_id(&self) -> String {
        format!("{}:{}", self.metadata.id, self.settings.routing_strategy())
    }

    /// Request body for `prompt`, read against the current settings.
    pub fn prepare_request(&self, prompt: &[Message]) -> ChatCompletionRequest {
        ChatCompletionRequest::from_prompt(self.routed_model_id(), prompt, &self.config)
    }

    /// Organization for the `X-HF-Bill-To` header, when configured.
    pub fn bill_to(&self) -> Option<String> {
        let organization = self.settings.organization();
        (!organization.is_empty()).then_some(organization)
    }
}

impl TextGenerationModel for HuggingFaceTextGenerationModel {
    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn set_config(&mut self, config: ModelConfig) {
        self.config = config;
    }

    fn generate_text<'a>(
        &'a self,
        prompt: Vec<Message>,
    ) -> Pin<Box<dyn Future<Output = Result<GenerativeAiResult>> + Send + 'a>> {
        Box::pin(async move {
            let request = self.prepare_request(&prompt);
            let model_id = request.model.clone();
            let api_key = self.settings.active_api_key();
            let bill_to = self.bill_to();

            let response = self
                .client
                .chat_completion(&api_key, bill_to.as_deref(), request)
                .await?;

            Ok(response.into_result(model_id)?)
        })
    }

    fn stream_generate_text<'a>(
        &'a self,
        _prompt: Vec<Message>,
    ) -> Result<GenerativeAiResultStream<'a>> {
        Err(ProviderError::Unimplemented("streaming text generation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_provider_core::store::{MemoryCache, MemoryOptionStore, OptionStore};
    use serde_json::json;

    use crate::settings::{ApiKeyResolver, ORGANIZATION_OPTION, ROUTING_STRATEGY_OPTION};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn model_with(options: Arc<MemoryOptionStore>) -> HuggingFaceTextGenerationModel {
        let settings = SettingsStore::new(
            options,
            Arc::new(MemoryCache::new()),
            ApiKeyResolver::new().with_env_lookup(no_env),
        );
        HuggingFaceTextGenerationModel::new(
            ModelMetadata::new("meta-llama/Llama-3.1-8B-Instruct"),
            Arc::new(HuggingFaceClient::default()),
            settings,
        )
    }

    #[test]
    fn model_id_carries_routing_suffix() {
        let options = Arc::new(MemoryOptionStore::new());
        let model = model_with(options.clone());
        assert_eq!(model.routed_model_id(), "meta-llama/Llama-3.1-8B-Instruct:preferred");

        options.set(ROUTING_STRATEGY_OPTION, json!("fastest"));
        assert_eq!(
            model.prepare_request(&[Message::user("hi")]).model,
            "meta-llama/Llama-3.1-8B-Instruct:fastest"
        );
    }

    #[test]
    fn bill_to_only_with_organization() {
        let options = Arc::new(MemoryOptionStore::new());
        let model = model_with(options.clone());
        assert_eq!(model.bill_to(), None);

        options.set(ORGANIZATION_OPTION, json!(" acme "));
        assert_eq!(model.bill_to().as_deref(), Some("acme"));
    }

    #[test]
    fn config_flows_into_request() {
        let model = model_with(Arc::new(MemoryOptionStore::new()))
            .with_config(ModelConfig::default().with_system_instruction("S").with_max_tokens(10));

        let request = model.prepare_request(&[Message::user("hi")]);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.max_tokens, Some(10));
    }

    #[test]
    fn streaming_is_unimplemented() {
        let model = model_with(Arc::new(MemoryOptionStore::new()));
        let result = model.stream_generate_text(vec![Message::user("hi")]);
        assert!(matches!(result, Err(ProviderError::Unimplemented(_))));
    }
}
