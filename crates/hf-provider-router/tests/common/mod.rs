#![allow(dead_code)]

use std::sync::Arc;

use hf_provider_core::store::{MemoryCache, MemoryOptionStore, OptionStore};
use hf_provider_router::{
    HuggingFaceProvider, HuggingFaceProviderBuilder,
    settings::{ApiKeyResolver, CREDENTIALS_OPTION, ENABLED_MODELS_OPTION},
};
use serde_json::{Value, json};
use wiremock::MockServer;

pub struct Fixture {
    pub options: Arc<MemoryOptionStore>,
    pub cache: Arc<MemoryCache>,
    pub provider: HuggingFaceProvider,
}

impl Fixture {
    pub fn enable(&self, ids: &[&str]) {
        self.options.set(ENABLED_MODELS_OPTION, json!(ids));
    }

    pub fn set_option(&self, name: &str, value: Value) {
        self.options.set(name, value);
    }
}

fn no_env(_: &str) -> Option<String> {
    None
}

/// Provider pointed at `server` with a stored key of `hf_test_key`.
pub fn fixture(server: &MockServer) -> Fixture {
    let options = Arc::new(MemoryOptionStore::new());
    let cache = Arc::new(MemoryCache::new());
    options.set(CREDENTIALS_OPTION, json!({"huggingface": "hf_test_key"}));

    let provider = HuggingFaceProviderBuilder::new()
        .with_base_url(server.uri())
        .with_api_key_resolver(ApiKeyResolver::new().with_env_lookup(no_env))
        .with_option_store(options.clone())
        .with_cache(cache.clone())
        .build()
        .expect("provider builds");

    Fixture {
        options,
        cache,
        provider,
    }
}

pub fn model_listing() -> Value {
    json!({
        "object": "list",
        "data": [
            {"id": "meta-llama/Llama-3.1-8B-Instruct", "object": "model", "owned_by": "meta-llama"},
            {"id": "Qwen/Qwen3-8B", "object": "model", "owned_by": "Qwen"},
            {"id": "gpt2", "object": "model"}
        ]
    })
}
