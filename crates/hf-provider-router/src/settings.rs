//! Persisted provider configuration and the sanitizers that guard it.
//!
//! Raw form submissions are untyped JSON. Each option has one sanitizer that
//! turns arbitrary input into a valid value; the readers re-apply the same
//! rules to whatever the option store holds, so a hand-edited store can never
//! yield an invalid [`HuggingFaceSettings`].
use std::{fmt, sync::Arc};

use hf_provider_core::{
    error::Result,
    host::{SettingRegistration, SettingType},
    schema_util::derive_settings_schema,
    store::{Cache, OptionStore},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::catalog::MODELS_CACHE_KEY;

pub const PROVIDER_ID: &str = "huggingface";
pub const API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

/// Option group the settings form submits to.
pub const OPTION_GROUP: &str = "huggingface-provider";

/// Credentials map shared with other providers, keyed by provider id.
pub const CREDENTIALS_OPTION: &str = "wp_ai_client_provider_credentials";
pub const ENABLED_MODELS_OPTION: &str = "huggingface_enabled_models";
pub const ROUTING_STRATEGY_OPTION: &str = "huggingface_routing_strategy";
pub const ORGANIZATION_OPTION: &str = "huggingface_organization";

/// How the router picks among inference providers serving the same model.
/// Sent as a `:{strategy}` suffix on the model id.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    #[default]
    Preferred,
    Fastest,
    Cheapest,
}

impl RoutingStrategy {
    pub const ALL: [RoutingStrategy; 3] = [
        RoutingStrategy::Preferred,
        RoutingStrategy::Fastest,
        RoutingStrategy::Cheapest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoutingStrategy::Preferred => "preferred",
            RoutingStrategy::Fastest => "fastest",
            RoutingStrategy::Cheapest => "cheapest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoutingStrategy::Preferred => "Preferred (default)",
            RoutingStrategy::Fastest => "Fastest",
            RoutingStrategy::Cheapest => "Cheapest",
        }
    }

    /// Exact, case-sensitive match against the wire names.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view over every non-secret option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HuggingFaceSettings {
    /// Routing suffix appended to every model id.
    pub routing_strategy: RoutingStrategy,
    /// Organization billed through `X-HF-Bill-To`; empty disables the header.
    pub organization: String,
    /// Model ids exposed to the host, in selection order.
    pub enabled_models: Vec<String>,
}

/// Where the active API key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    Constant,
    Stored,
}

impl ApiKeySource {
    /// Whether the key is managed outside the settings form.
    pub fn is_external(self) -> bool {
        matches!(self, ApiKeySource::Environment | ApiKeySource::Constant)
    }

    pub fn describe(self) -> &'static str {
        match self {
            ApiKeySource::Environment => "HUGGINGFACE_API_KEY environment variable",
            ApiKeySource::Constant => "HUGGINGFACE_API_KEY constant",
            ApiKeySource::Stored => "stored credentials",
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolves the API key in priority order: environment variable, pinned
/// constant, stored credential.
#[derive(Clone)]
pub struct ApiKeyResolver {
    constant: Option<String>,
    env_lookup: fn(&str) -> Option<String>,
}

impl Default for ApiKeyResolver {
    fn default() -> Self {
        Self {
            constant: None,
            env_lookup: read_env,
        }
    }
}

impl fmt::Debug for ApiKeyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyResolver")
            .field("constant", &self.constant.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl ApiKeyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pinned by the embedding application at build time.
    pub fn with_constant(mut self, key: impl Into<String>) -> Self {
        self.constant = Some(key.into());
        self
    }

    /// Replace the environment lookup, e.g. to read from a dotenv map.
    pub fn with_env_lookup(mut self, lookup: fn(&str) -> Option<String>) -> Self {
        self.env_lookup = lookup;
        self
    }

    /// Externally managed key, if any, with its source.
    pub fn external(&self) -> Option<(String, ApiKeySource)> {
        if let Some(key) = (self.env_lookup)(API_KEY_ENV).filter(|k| !k.is_empty()) {
            return Some((key, ApiKeySource::Environment));
        }
        self.constant
            .as_ref()
            .filter(|k| !k.is_empty())
            .map(|k| (k.clone(), ApiKeySource::Constant))
    }

    /// Active key and its source; `("", None)` when nothing is configured.
    pub fn resolve(&self, stored: &str) -> (String, Option<ApiKeySource>) {
        match self.external() {
            Some((key, source)) => (key, Some(source)),
            None if !stored.is_empty() => (stored.to_owned(), Some(ApiKeySource::Stored)),
            None => (String::new(), None),
        }
    }
}

/// Mask all but the first 3 and last 4 characters of keys longer than 8;
/// shorter keys are fully masked.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let len = chars.len();
    if len <= 8 {
        return "*".repeat(len);
    }

    let head: String = chars[..3].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(len - 7))
}

/// Plain-text sanitation for single-line form fields: tags are stripped,
/// whitespace runs (including newlines and tabs) collapse to one space and
/// the result is trimmed.
pub fn sanitize_text_field(input: &str) -> String {
    let mut stripped = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            other => stripped.push(other),
        }
    }

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Anything outside the closed strategy set becomes `preferred`.
pub fn sanitize_routing_strategy(input: &Value) -> RoutingStrategy {
    input
        .as_str()
        .and_then(RoutingStrategy::parse)
        .unwrap_or_default()
}

pub fn sanitize_organization(input: &Value) -> String {
    input.as_str().map(sanitize_text_field).unwrap_or_default()
}

/// Coerce a submitted checkbox list into plain strings. Non-list input yields
/// an empty selection.
pub fn sanitize_enabled_models(input: &Value) -> Vec<String> {
    let items: Vec<&Value> = match input {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(text) => sanitize_text_field(text),
            Value::Number(number) => number.to_string(),
            Value::Bool(true) => "1".to_owned(),
            _ => String::new(),
        })
        .filter(|id| !id.is_empty())
        .collect()
}

/// Reads and writes provider configuration through the host's option store.
///
/// The catalog cache is held only to invalidate it when the credential
/// changes.
#[derive(Clone)]
pub struct SettingsStore {
    options: Arc<dyn OptionStore>,
    cache: Arc<dyn Cache>,
    resolver: ApiKeyResolver,
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl SettingsStore {
    pub fn new(
        options: Arc<dyn OptionStore>,
        cache: Arc<dyn Cache>,
        resolver: ApiKeyResolver,
    ) -> Self {
        Self {
            options,
            cache,
            resolver,
        }
    }

    pub fn routing_strategy(&self) -> RoutingStrategy {
        self.options
            .get(ROUTING_STRATEGY_OPTION)
            .map(|value| sanitize_routing_strategy(&value))
            .unwrap_or_default()
    }

    pub fn organization(&self) -> String {
        self.options
            .get(ORGANIZATION_OPTION)
            .and_then(|value| value.as_str().map(|s| s.trim().to_owned()))
            .unwrap_or_default()
    }

    pub fn enabled_models(&self) -> Vec<String> {
        match self.options.get(ENABLED_MODELS_OPTION) {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(id) => Some(id),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn settings(&self) -> HuggingFaceSettings {
        HuggingFaceSettings {
            routing_strategy: self.routing_strategy(),
            organization: self.organization(),
            enabled_models: self.enabled_models(),
        }
    }

    /// The shared credentials map; a corrupt value reads as empty.
    pub fn credentials(&self) -> Map<String, Value> {
        match self.options.get(CREDENTIALS_OPTION) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    pub fn stored_api_key(&self) -> String {
        self.credentials()
            .get(PROVIDER_ID)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    }

    /// Key used for outgoing requests; empty when nothing is configured.
    pub fn active_api_key(&self) -> String {
        self.resolver.resolve(&self.stored_api_key()).0
    }

    pub fn api_key_source(&self) -> Option<ApiKeySource> {
        self.resolver.resolve(&self.stored_api_key()).1
    }

    pub fn resolver(&self) -> &ApiKeyResolver {
        &self.resolver
    }

    /// Merge this provider's key from `input` into the shared credentials
    /// map.
    ///
    /// Non-object input leaves the map untouched and a missing entry keeps
    /// the old key. The model cache is dropped only when the key really
    /// changes, since a different account may see a different catalog.
    pub fn sanitize_credentials(&self, input: &Value) -> Map<String, Value> {
        let mut existing = self.credentials();
        let Some(input) = input.as_object() else {
            return existing;
        };

        let old_key = existing
            .get(PROVIDER_ID)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let new_key = match input.get(PROVIDER_ID) {
            Some(Value::String(key)) => key.trim().to_owned(),
            Some(Value::Number(number)) => number.to_string(),
            _ => old_key.clone(),
        };

        if new_key != old_key {
            tracing::info!("API key changed, invalidating model cache");
            self.cache.invalidate(MODELS_CACHE_KEY);
        }

        existing.insert(PROVIDER_ID.to_owned(), Value::String(new_key));
        existing
    }

    /// Sanitize and persist a submitted settings form.
    ///
    /// Every registered option is processed. Absent fields sanitize from
    /// `null`, so a form with no model ticked clears the selection.
    pub fn apply_submission(&self, form: &Map<String, Value>) -> HuggingFaceSettings {
        let field = |name: &str| form.get(name).cloned().unwrap_or(Value::Null);

        let credentials = self.sanitize_credentials(&field(CREDENTIALS_OPTION));
        self.options.set(CREDENTIALS_OPTION, Value::Object(credentials));

        let settings = HuggingFaceSettings {
            routing_strategy: sanitize_routing_strategy(&field(ROUTING_STRATEGY_OPTION)),
            organization: sanitize_organization(&field(ORGANIZATION_OPTION)),
            enabled_models: sanitize_enabled_models(&field(ENABLED_MODELS_OPTION)),
        };

        self.options.set(ENABLED_MODELS_OPTION, json!(settings.enabled_models));
        self.options.set(ROUTING_STRATEGY_OPTION, json!(settings.routing_strategy.as_str()));
        self.options.set(ORGANIZATION_OPTION, json!(settings.organization));

        tracing::debug!(
            enabled = settings.enabled_models.len(),
            routing = %settings.routing_strategy,
            "settings saved"
        );
        settings
    }

    /// Options the host must accept from the settings form.
    pub fn registrations() -> Vec<SettingRegistration> {
        vec![
            SettingRegistration {
                option_group: OPTION_GROUP,
                option_name: CREDENTIALS_OPTION,
                kind: SettingType::Object,
                default: json!({}),
            },
            SettingRegistration {
                option_group: OPTION_GROUP,
                option_name: ENABLED_MODELS_OPTION,
                kind: SettingType::Array,
                default: json!([]),
            },
            SettingRegistration {
                option_group: OPTION_GROUP,
                option_name: ROUTING_STRATEGY_OPTION,
                kind: SettingType::String,
                default: json!(RoutingStrategy::Preferred.as_str()),
            },
            SettingRegistration {
                option_group: OPTION_GROUP,
                option_name: ORGANIZATION_OPTION,
                kind: SettingType::String,
                default: json!(""),
            },
        ]
    }

    /// JSON Schema of [`HuggingFaceSettings`].
    pub fn schema() -> Result<Value> {
        derive_settings_schema::<HuggingFaceSettings>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_provider_core::store::{MemoryCache, MemoryOptionStore};
    use std::time::Duration;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_key(name: &str) -> Option<String> {
        (name == API_KEY_ENV).then(|| "hf_env_key_123".to_owned())
    }

    fn store_with(resolver: ApiKeyResolver) -> (SettingsStore, Arc<MemoryOptionStore>, Arc<MemoryCache>) {
        let options = Arc::new(MemoryOptionStore::new());
        let cache = Arc::new(MemoryCache::new());
        let store = SettingsStore::new(options.clone(), cache.clone(), resolver);
        (store, options, cache)
    }

    fn store() -> (SettingsStore, Arc<MemoryOptionStore>, Arc<MemoryCache>) {
        store_with(ApiKeyResolver::new().with_env_lookup(no_env))
    }

    #[test]
    fn routing_strategy_outside_enum_is_preferred() {
        for input in [json!("fastest!"), json!("FASTEST"), json!(""), json!(3), json!(null), json!(["cheapest"])] {
            assert_eq!(sanitize_routing_strategy(&input), RoutingStrategy::Preferred, "{input}");
        }
        assert_eq!(sanitize_routing_strategy(&json!("fastest")), RoutingStrategy::Fastest);
        assert_eq!(sanitize_routing_strategy(&json!("cheapest")), RoutingStrategy::Cheapest);
    }

    #[test]
    fn organization_is_trimmed_text() {
        assert_eq!(sanitize_organization(&json!("  acme-inc \n")), "acme-inc");
        assert_eq!(sanitize_organization(&json!("<b>acme</b>")), "acme");
        assert_eq!(sanitize_organization(&json!(42)), "");
    }

    #[test]
    fn enabled_models_drops_non_array_input() {
        assert!(sanitize_enabled_models(&json!("meta-llama/x")).is_empty());
        assert!(sanitize_enabled_models(&json!(null)).is_empty());
        assert_eq!(
            sanitize_enabled_models(&json!(["a/b", " c/d ", 7, null])),
            vec!["a/b", "c/d", "7"]
        );
    }

    #[test]
    fn mask_keeps_prefix_and_suffix() {
        assert_eq!(mask_api_key("hf_abcdefghijkl"), "hf_********ijkl");
        assert_eq!(mask_api_key("short"), "*****");
        assert_eq!(mask_api_key("12345678"), "********");
    }

    #[test]
    fn credential_change_invalidates_model_cache() {
        let (store, options, cache) = store();
        options.set(CREDENTIALS_OPTION, json!({"huggingface": "old", "openai": "sk"}));
        cache.set(MODELS_CACHE_KEY, json!([]), Duration::from_secs(600));

        let merged = store.sanitize_credentials(&json!({"huggingface": " new "}));

        assert_eq!(merged.get("huggingface"), Some(&json!("new")));
        assert_eq!(merged.get("openai"), Some(&json!("sk")));
        assert!(cache.get(MODELS_CACHE_KEY).is_none());
    }

    #[test]
    fn same_credential_keeps_model_cache() {
        let (store, options, cache) = store();
        options.set(CREDENTIALS_OPTION, json!({"huggingface": "same"}));
        cache.set(MODELS_CACHE_KEY, json!([]), Duration::from_secs(600));

        store.sanitize_credentials(&json!({"huggingface": "same "}));
        store.sanitize_credentials(&json!({"other": "x"}));
        store.sanitize_credentials(&json!("not a map"));

        assert!(cache.get(MODELS_CACHE_KEY).is_some());
    }

    #[test]
    fn non_object_credentials_return_existing() {
        let (store, options, _) = store();
        options.set(CREDENTIALS_OPTION, json!({"huggingface": "k"}));

        let merged = store.sanitize_credentials(&json!(null));
        assert_eq!(Value::Object(merged), json!({"huggingface": "k"}));
    }

    #[test]
    fn api_key_priority_env_constant_stored() {
        let (stored_only, options, _) = store();
        options.set(CREDENTIALS_OPTION, json!({"huggingface": "stored"}));
        assert_eq!(stored_only.active_api_key(), "stored");
        assert_eq!(stored_only.api_key_source(), Some(ApiKeySource::Stored));

        let (with_constant, options, _) =
            store_with(ApiKeyResolver::new().with_env_lookup(no_env).with_constant("pinned"));
        options.set(CREDENTIALS_OPTION, json!({"huggingface": "stored"}));
        assert_eq!(with_constant.active_api_key(), "pinned");
        assert_eq!(with_constant.api_key_source(), Some(ApiKeySource::Constant));

        let (with_env, options, _) =
            store_with(ApiKeyResolver::new().with_env_lookup(env_key).with_constant("pinned"));
        options.set(CREDENTIALS_OPTION, json!({"huggingface": "stored"}));
        assert_eq!(with_env.active_api_key(), "hf_env_key_123");
        assert_eq!(with_env.api_key_source(), Some(ApiKeySource::Environment));
    }

    #[test]
    fn reads_key_from_shared_credentials_map() {
        let (store, options, _) = store();
        options.set(
            "wp_ai_client_provider_credentials",
            json!({"huggingface": "hf_shared", "openai": "sk"}),
        );
        assert_eq!(store.stored_api_key(), "hf_shared");
        assert_eq!(store.credentials().len(), 2);
    }

    #[test]
    fn empty_constant_falls_through() {
        let (store, _, _) = store_with(ApiKeyResolver::new().with_env_lookup(no_env).with_constant(""));
        assert_eq!(store.active_api_key(), "");
        assert_eq!(store.api_key_source(), None);
    }

    #[test]
    fn submission_persists_sanitized_values() {
        let (store, options, _) = store();
        let form = json!({
            CREDENTIALS_OPTION: {"huggingface": "hf_key"},
            ENABLED_MODELS_OPTION: ["a/b", "c"],
            ROUTING_STRATEGY_OPTION: "cheapest",
            ORGANIZATION_OPTION: "  acme "
        });

        let saved = store.apply_submission(form.as_object().unwrap());

        assert_eq!(saved.routing_strategy, RoutingStrategy::Cheapest);
        assert_eq!(saved.organization, "acme");
        assert_eq!(saved.enabled_models, vec!["a/b", "c"]);
        assert_eq!(store.settings(), saved);
        assert_eq!(store.stored_api_key(), "hf_key");
        assert_eq!(options.get(ROUTING_STRATEGY_OPTION), Some(json!("cheapest")));
    }

    #[test]
    fn submission_without_models_clears_selection() {
        let (store, options, _) = store();
        options.set(ENABLED_MODELS_OPTION, json!(["a/b"]));
        options.set(CREDENTIALS_OPTION, json!({"huggingface": "keep"}));

        let saved = store.apply_submission(&Map::new());

        assert!(saved.enabled_models.is_empty());
        assert_eq!(saved.routing_strategy, RoutingStrategy::Preferred);
        assert_eq!(store.stored_api_key(), "keep");
    }

    #[test]
    fn readers_revalidate_stored_values() {
        let (store, options, _) = store();
        options.set(ROUTING_STRATEGY_OPTION, json!("warp-speed"));
        options.set(ORGANIZATION_OPTION, json!(" org "));
        options.set(ENABLED_MODELS_OPTION, json!(["a", 1, "b"]));

        assert_eq!(store.routing_strategy(), RoutingStrategy::Preferred);
        assert_eq!(store.organization(), "org");
        assert_eq!(store.enabled_models(), vec!["a", "b"]);
    }

    #[test]
    fn schema_describes_settings_fields() {
        let schema = SettingsStore::schema().unwrap();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("routing_strategy"));
        assert!(properties.contains_key("organization"));
        assert!(properties.contains_key("enabled_models"));
    }

    #[test]
    fn registrations_cover_every_option() {
        let names: Vec<&str> = SettingsStore::registrations()
            .iter()
            .map(|r| r.option_name)
            .collect();
        assert_eq!(
            names,
            vec![
                CREDENTIALS_OPTION,
                ENABLED_MODELS_OPTION,
                ROUTING_STRATEGY_OPTION,
                ORGANIZATION_OPTION
            ]
        );
    }
}
