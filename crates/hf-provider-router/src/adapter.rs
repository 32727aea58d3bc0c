use std::{env, sync::Arc};

use hf_provider_core::{
    error::{ProviderError, Result},
    store::{Cache, MemoryCache, MemoryOptionStore, OptionStore},
};
use reqwest::Client as HttpClient;

use crate::{
    catalog::{ModelCatalog, ModelRecord},
    client::HuggingFaceClient,
    directory::HuggingFaceModelDirectory,
    provider_impl::HuggingFaceAvailability,
    reconcile::{Reconciliation, reconcile},
    settings::{ApiKeyResolver, SettingsStore},
};

/// Environment variable that overrides the router base URL.
pub const BASE_URL_ENV: &str = "HUGGINGFACE_BASE_URL";

/// Service object that wires the HTTP client, the settings store and the
/// model catalog into a value implementing
/// [`hf_provider_core::provider::Provider`].
///
/// Build one with [`HuggingFaceProviderBuilder`] and pass it around
/// explicitly; there is no global instance.
pub struct HuggingFaceProvider {
    pub(crate) client: Arc<HuggingFaceClient>,
    pub(crate) settings: SettingsStore,
    pub(crate) catalog: ModelCatalog,
    pub(crate) availability: HuggingFaceAvailability,
    pub(crate) directory: HuggingFaceModelDirectory,
}

impl HuggingFaceProvider {
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn client(&self) -> &HuggingFaceClient {
        &self.client
    }

    /// Full catalog fetched with the active key.
    pub async fn fetch_models(&self) -> Vec<ModelRecord> {
        let api_key = self.settings.active_api_key();
        self.catalog.fetch_all(&api_key).await
    }

    /// Catalog grouped by namespace together with the stale selections.
    pub async fn model_selection(&self) -> (Vec<ModelRecord>, Reconciliation) {
        let models = self.fetch_models().await;
        let selection = reconcile(&models, &self.settings.enabled_models());
        (models, selection)
    }
}

/// Builder for [`HuggingFaceProvider`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use hf_provider_router::HuggingFaceProviderBuilder;
///
/// let provider = HuggingFaceProviderBuilder::new_from_env()
///     .build()
///     .expect("HTTP client should build");
/// ```
///
/// Without explicit stores the provider keeps options and cache in memory,
/// which is enough for scripts and tests. Hosts plug in their own
/// [`OptionStore`] and [`Cache`].
#[derive(Default)]
pub struct HuggingFaceProviderBuilder {
    pub(crate) base_url: Option<String>,
    pub(crate) resolver: ApiKeyResolver,
    pub(crate) options: Option<Arc<dyn OptionStore>>,
    pub(crate) cache: Option<Arc<dyn Cache>>,
    pub(crate) http: Option<HttpClient>,
}

impl HuggingFaceProviderBuilder {
    /// Create an *empty* builder pointing at the public router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor that honours `HUGGINGFACE_BASE_URL`.
    ///
    /// The API key itself is looked up on every request, so rotating
    /// `HUGGINGFACE_API_KEY` needs no rebuild.
    pub fn new_from_env() -> Self {
        Self {
            base_url: env::var(BASE_URL_ENV).ok().filter(|url| !url.is_empty()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Pin an API key at build time. It ranks below the environment variable
    /// and above the stored credential.
    pub fn with_api_key_constant(mut self, api_key: impl Into<String>) -> Self {
        self.resolver = self.resolver.with_constant(api_key);
        self
    }

    pub fn with_api_key_resolver(mut self, resolver: ApiKeyResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_option_store(mut self, options: Arc<dyn OptionStore>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxy, custom TLS, …).
    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Finalise the builder and return a ready-to-use provider.
    ///
    /// # Errors
    ///
    /// * [`ProviderError::Invalid`] – if the HTTP client cannot be built.
    pub fn build(self) -> Result<HuggingFaceProvider> {
        let http = match self.http {
            Some(http) => http,
            None => HttpClient::builder()
                .build()
                .map_err(|err| ProviderError::Invalid(format!("building HTTP client: {err}")))?,
        };

        let options = self
            .options
            .unwrap_or_else(|| Arc::new(MemoryOptionStore::new()));
        let cache = self.cache.unwrap_or_else(|| Arc::new(MemoryCache::new()));

        let client = Arc::new(HuggingFaceClient::with_http(http, self.base_url));
        let settings = SettingsStore::new(options, Arc::clone(&cache), self.resolver);
        let catalog = ModelCatalog::new(Arc::clone(&client), cache);

        Ok(HuggingFaceProvider {
            availability: HuggingFaceAvailability::new(settings.clone()),
            directory: HuggingFaceModelDirectory::new(settings.clone(), catalog.clone()),
            client,
            settings,
            catalog,
        })
    }
}
