use hf_provider_core::generic::{
    Candidate, FinishReason, GenerativeAiResult, Message, MessagePart, MessageRole as PromptRole,
    TokenUsage,
};
use hf_provider_core::model::ModelConfig;
use serde::{Deserialize, Serialize};

use crate::error::HuggingFaceError;

use super::common::Usage;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<ChatCompletionMessage>) -> Self {
        Self {
            model,
            messages,
            max_tokens: None,
            temperature: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
            stop: None,
        }
    }

    /// Build the request body for `prompt` under `config`.
    ///
    /// The system instruction, when present, becomes the first message.
    /// Optional sampling parameters are only set when configured, and stop
    /// sequences only when there is at least one.
    pub fn from_prompt(model: String, prompt: &[Message], config: &ModelConfig) -> Self {
        let mut messages = Vec::with_capacity(prompt.len() + 1);
        if let Some(instruction) = &config.system_instruction {
            messages.push(ChatCompletionMessage::new(
                MessageRole::System,
                instruction.clone(),
            ));
        }
        messages.extend(prompt.iter().map(ChatCompletionMessage::from));

        let mut request = Self::new(model, messages);
        request.max_tokens = config.max_tokens;
        request.temperature = config.temperature;
        request.top_p = config.top_p;
        request.frequency_penalty = config.frequency_penalty;
        request.presence_penalty = config.presence_penalty;
        if !config.stop_sequences.is_empty() {
            request.stop = Some(config.stop_sequences.clone());
        }
        request
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl From<PromptRole> for MessageRole {
    fn from(value: PromptRole) -> Self {
        match value {
            PromptRole::User => MessageRole::User,
            PromptRole::Model => MessageRole::Assistant,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChatCompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatCompletionMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatCompletionMessage {
    fn from(value: &Message) -> Self {
        Self {
            role: value.role.into(),
            content: value.text_content(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChatCompletionMessageForResponse {
    #[serde(default)]
    pub role: Option<MessageRole>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub message: ChatCompletionMessageForResponse,
    #[serde(default)]
    pub finish_reason: Option<WireFinishReason>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Map the wire response onto the host's result type.
    ///
    /// # Errors
    ///
    /// [`HuggingFaceError::Format`] when the response carries no choices.
    pub fn into_result(self, model_id: String) -> Result<GenerativeAiResult, HuggingFaceError> {
        if self.choices.is_empty() {
            return Err(HuggingFaceError::Format("response has no choices".into()));
        }

        let candidates = self
            .choices
            .into_iter()
            .map(|choice| Candidate {
                message: Message {
                    role: PromptRole::Model,
                    parts: choice
                        .message
                        .content
                        .map(MessagePart::Text)
                        .into_iter()
                        .collect(),
                },
                finish_reason: choice
                    .finish_reason
                    .map(Into::into)
                    .unwrap_or(FinishReason::Stop),
            })
            .collect();

        let usage = self.usage.unwrap_or_default();
        let token_usage = TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total(),
        };

        Ok(GenerativeAiResult {
            id: self.id.unwrap_or_default(),
            candidates,
            token_usage,
            model_id: self.model.unwrap_or(model_id),
        })
    }
}

/// Finish reasons as sent on the wire. Anything unknown collapses into
/// [`WireFinishReason::Other`] and is reported as a regular stop.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum WireFinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    #[serde(other)]
    Other,
}

impl From<WireFinishReason> for FinishReason {
    fn from(value: WireFinishReason) -> Self {
        match value {
            WireFinishReason::Stop | WireFinishReason::Other => FinishReason::Stop,
            WireFinishReason::Length => FinishReason::Length,
            WireFinishReason::ContentFilter => FinishReason::ContentFilter,
            WireFinishReason::ToolCalls => FinishReason::ToolCalls,
        }
    }
}
