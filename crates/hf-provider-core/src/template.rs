//! Conversion of user-facing values into prompt turns.
//!
//! The host hands providers a `Vec<Message>`. [`IntoPrompt`] lets callers of
//! [`ProviderClient`](crate::client::ProviderClient) pass a plain string, a
//! single message or a full history without building the vector by hand.
//!
//! ```rust
//! use hf_provider_core::template::IntoPrompt;
//! use hf_provider_core::generic::MessageRole;
//!
//! let prompt = "Summarise this article.".into_prompt();
//! assert_eq!(prompt.len(), 1);
//! assert_eq!(prompt[0].role, MessageRole::User);
//! ```
use crate::generic::Message;

/// Converts a value into a series of prompt turns.
pub trait IntoPrompt {
    /// Consume `self` and return **all** turns in the desired order.
    fn into_prompt(self) -> Vec<Message>;
}

impl IntoPrompt for Message {
    fn into_prompt(self) -> Vec<Message> {
        vec![self]
    }
}

impl IntoPrompt for Vec<Message> {
    fn into_prompt(self) -> Vec<Message> {
        self
    }
}

impl IntoPrompt for &str {
    fn into_prompt(self) -> Vec<Message> {
        vec![Message::user(self)]
    }
}

impl IntoPrompt for String {
    fn into_prompt(self) -> Vec<Message> {
        vec![Message::user(self)]
    }
}
