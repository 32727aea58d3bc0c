//! Generic prompt and result types shared between the host framework and
//! every backend.
//!
//! They mirror the concepts the host exposes to providers: a prompt is a list
//! of [`Message`] turns, each made of typed [`MessagePart`]s, and a generation
//! returns a [`GenerativeAiResult`] with one [`Candidate`] per choice.
//!
//! Backends translate them into their own wire structs via plain `From` /
//! `Into` impls, which keeps these types free of transport concerns.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single prompt turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
}

impl Message {
    /// Convenience constructor for a message made of a single text part.
    ///
    /// ```rust
    /// use hf_provider_core::generic::{Message, MessageRole};
    ///
    /// let turn = Message::text(MessageRole::User, "Hello!");
    /// assert_eq!(turn.text_content(), "Hello!");
    /// ```
    pub fn text(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![MessagePart::Text(text.into())],
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::text(MessageRole::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::text(MessageRole::Model, text)
    }

    pub fn with_part(mut self, part: MessagePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Concatenation of all text parts. Files and function payloads are
    /// skipped.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                MessagePart::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Roles the host framework assigns to prompt turns.
///
/// System behaviour is configured through
/// [`ModelConfig::system_instruction`](crate::model::ModelConfig) rather than
/// through a message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Turns written by the human user.
    User,
    /// Turns previously produced by the model.
    Model,
}

impl Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Model => write!(f, "model"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum MessagePart {
    Text(String),
    File {
        mime_type: String,
        data: String,
    },
    FunctionCall {
        id: Option<String>,
        name: String,
        args: serde_json::Value,
    },
    FunctionResponse {
        id: Option<String>,
        name: String,
        response: serde_json::Value,
    },
}

/// Outcome of a single text generation call.
#[derive(Debug, Clone)]
pub struct GenerativeAiResult {
    pub id: String,
    pub candidates: Vec<Candidate>,
    pub token_usage: TokenUsage,
    /// Identifier of the model that served the request, as sent upstream.
    pub model_id: String,
}

impl GenerativeAiResult {
    /// Text of the first candidate, if any.
    pub fn to_text(&self) -> Option<String> {
        self.candidates
            .first()
            .map(|candidate| candidate.message.text_content())
    }
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub message: Message,
    pub finish_reason: FinishReason,
}

/// Closed set of reasons a candidate stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
}

impl Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinishReason::Stop => write!(f, "stop"),
            FinishReason::Length => write!(f, "length"),
            FinishReason::ContentFilter => write!(f, "content_filter"),
            FinishReason::ToolCalls => write!(f, "tool_calls"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}
