//! Fetch and cache the router's model catalog.
//!
//! The listing endpoint is slow and rate limited, so the normalized list is
//! cached for ten minutes. Failures never reach the caller: they are stored
//! for an hour so the settings page can show them, and an empty catalog is
//! returned instead.
use std::{sync::Arc, time::Duration};

use hf_provider_core::store::Cache;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{client::HuggingFaceClient, error::HuggingFaceError};

pub const MODELS_CACHE_KEY: &str = "huggingface_models_raw";
pub const FETCH_ERROR_CACHE_KEY: &str = "huggingface_models_fetch_error";

const CATALOG_TTL: Duration = Duration::from_secs(10 * 60);
const FETCH_ERROR_TTL: Duration = Duration::from_secs(60 * 60);

const MAX_MODEL_ID_CHARS: usize = 200;

/// Namespace used for ids without an owner prefix.
pub const FALLBACK_NAMESPACE: &str = "Other";

/// One model as listed upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: String,
    pub name: String,
    pub namespace: String,
}

impl ModelRecord {
    /// Build a record from an id, truncating it to 200 characters.
    pub fn from_id(id: &str) -> Self {
        let id: String = id.chars().take(MAX_MODEL_ID_CHARS).collect();
        Self {
            name: id.clone(),
            namespace: namespace_of(&id).to_owned(),
            id,
        }
    }
}

/// Owner prefix of a model id: everything before the first `/`, or
/// [`FALLBACK_NAMESPACE`] when there is no separator.
pub fn namespace_of(model_id: &str) -> &str {
    match model_id.split_once('/') {
        Some((owner, _)) => owner,
        None => FALLBACK_NAMESPACE,
    }
}

/// Keep the entries that are objects with a string `id`.
pub(crate) fn normalize(entries: Vec<Value>) -> Vec<ModelRecord> {
    entries
        .iter()
        .filter_map(|entry| entry.get("id")?.as_str())
        .map(ModelRecord::from_id)
        .collect()
}

/// Cached view over `GET /models`.
#[derive(Clone)]
pub struct ModelCatalog {
    client: Arc<HuggingFaceClient>,
    cache: Arc<dyn Cache>,
}

impl ModelCatalog {
    pub fn new(client: Arc<HuggingFaceClient>, cache: Arc<dyn Cache>) -> Self {
        Self { client, cache }
    }

    /// Return the catalog, fetching it when the cache is cold.
    ///
    /// Never fails: on error the message is recorded (see
    /// [`Self::last_error`]) and an empty list is returned.
    pub async fn fetch_all(&self, api_key: &str) -> Vec<ModelRecord> {
        if let Some(models) = self.cached() {
            tracing::debug!(count = models.len(), "model catalog served from cache");
            return models;
        }

        match self.fetch_remote(api_key).await {
            Ok(models) => {
                self.cache.invalidate(FETCH_ERROR_CACHE_KEY);
                match serde_json::to_value(&models) {
                    Ok(value) => self.cache.set(MODELS_CACHE_KEY, value, CATALOG_TTL),
                    Err(err) => tracing::warn!(error = %err, "could not cache model catalog"),
                }
                tracing::debug!(count = models.len(), "model catalog refreshed");
                models
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch model catalog");
                self.cache.set(
                    FETCH_ERROR_CACHE_KEY,
                    Value::String(err.to_string()),
                    FETCH_ERROR_TTL,
                );
                Vec::new()
            }
        }
    }

    /// Message of the last failed fetch, while it is still fresh.
    pub fn last_error(&self) -> Option<String> {
        self.cache
            .get(FETCH_ERROR_CACHE_KEY)
            .and_then(|entry| entry.value.as_str().map(str::to_owned))
            .filter(|message| !message.is_empty())
    }

    /// Drop the cached catalog so the next read hits the network.
    pub fn invalidate(&self) {
        tracing::info!("model catalog cache invalidated");
        self.cache.invalidate(MODELS_CACHE_KEY);
    }

    /// Cached catalog; undecodable entries count as a miss.
    fn cached(&self) -> Option<Vec<ModelRecord>> {
        let entry = self.cache.get(MODELS_CACHE_KEY)?;
        serde_json::from_value(entry.value).ok()
    }

    async fn fetch_remote(&self, api_key: &str) -> Result<Vec<ModelRecord>, HuggingFaceError> {
        let listing = self.client.list_models(api_key).await?;
        Ok(normalize(listing.into_entries()))
    }
}
