//! Metadata describing providers and the models they expose.
//!
//! Unlike a fixed enum of well-known model names, remote catalogs change all
//! the time, so models are identified by opaque string ids and described by
//! [`ModelMetadata`]. The host inspects the declared capabilities and option
//! support to decide which model may serve a request.
//!
//! # Example
//!
//! ```rust
//! use hf_provider_core::model::{CapabilityType, ModelMetadata};
//!
//! let meta = ModelMetadata::new("meta-llama/Llama-3.1-8B-Instruct")
//!     .with_capabilities(vec![CapabilityType::TextGeneration]);
//! assert!(meta.supports(CapabilityType::TextGeneration));
//! ```

use serde::{Deserialize, Serialize};

/// What a model can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityType {
    TextGeneration,
    ChatHistory,
    ImageGeneration,
    EmbeddingGeneration,
}

/// Generation options a model accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionName {
    SystemInstruction,
    MaxTokens,
    Temperature,
    TopP,
    StopSequences,
    FrequencyPenalty,
    PresencePenalty,
    InputModalities,
    OutputModalities,
}

/// Universal description of a model exposed by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub id: String,
    pub name: String,
    pub supported_capabilities: Vec<CapabilityType>,
    pub supported_options: Vec<OptionName>,
}

impl ModelMetadata {
    /// Metadata with `name == id` and nothing declared yet.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            supported_capabilities: Vec::new(),
            supported_options: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_capabilities(mut self, capabilities: Vec<CapabilityType>) -> Self {
        self.supported_capabilities = capabilities;
        self
    }

    pub fn with_options(mut self, options: Vec<OptionName>) -> Self {
        self.supported_options = options;
        self
    }

    pub fn supports(&self, capability: CapabilityType) -> bool {
        self.supported_capabilities.contains(&capability)
    }
}

/// Per-request generation settings. Every field is optional and only sent
/// upstream when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub system_instruction: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
    #[serde(default)]
    pub stop_sequences: Vec<String>,
}

impl ModelConfig {
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn with_stop_sequences(mut self, stop: Vec<String>) -> Self {
        self.stop_sequences = stop;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Cloud,
    Server,
    Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationMethod {
    ApiKey,
}

/// Static identity of a provider as shown to the host and its users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ProviderKind,
    pub credentials_url: &'static str,
    pub authentication: AuthenticationMethod,
}
