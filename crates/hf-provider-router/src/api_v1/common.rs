use serde::{Deserialize, Serialize};

/// Token accounting as reported by the router. Some upstream providers omit
/// fields, so all of them default to zero / absent.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

impl Usage {
    /// `total_tokens` when reported, otherwise prompt + completion.
    pub fn total(&self) -> u64 {
        self.total_tokens
            .unwrap_or(self.prompt_tokens.saturating_add(self.completion_tokens))
    }
}
