//! Renderers for the individual settings fields.
//!
//! Each function returns a finished fragment; [`super::SettingsPage`] lines
//! them up inside the form table.
use std::collections::HashSet;

use hf_provider_markup::builder::{Attrs, MarkupBuilder};

use super::TOKENS_URL;
use crate::{
    reconcile::Reconciliation,
    settings::{
        CREDENTIALS_OPTION, ENABLED_MODELS_OPTION, ORGANIZATION_OPTION, PROVIDER_ID,
        ROUTING_STRATEGY_OPTION, RoutingStrategy, SettingsStore, mask_api_key,
    },
};

pub const API_KEY_FIELD_ID: &str = "huggingface_api_key";

pub fn section_description() -> String {
    MarkupBuilder::new()
        .open("p", &Attrs::new())
        .text("Connect to the Hugging Face inference router. Create an access token at ")
        .open(
            "a",
            &Attrs::new()
                .set("href", TOKENS_URL)
                .set("target", "_blank")
                .set("rel", "noopener noreferrer"),
        )
        .text("huggingface.co/settings/tokens")
        .close("a")
        .text(".")
        .close("p")
        .finalize()
}

/// API key input, or a read-only note when the key comes from outside the
/// option store.
pub fn api_key_field(settings: &SettingsStore) -> String {
    if let Some((key, source)) = settings.resolver().external() {
        return MarkupBuilder::new()
            .open("p", &Attrs::new())
            .open(
                "span",
                &Attrs::new()
                    .set("class", "dashicons dashicons-yes-alt")
                    .set("style", "color: #00a32a;"),
            )
            .close("span")
            .text(format!(" Configured via {} (", source.describe()))
            .element("code", &Attrs::new(), mask_api_key(&key))
            .text(")")
            .close("p")
            .finalize();
    }

    MarkupBuilder::new()
        .void(
            "input",
            &Attrs::new()
                .set("type", "password")
                .set("id", API_KEY_FIELD_ID)
                .set("name", format!("{CREDENTIALS_OPTION}[{PROVIDER_ID}]"))
                .set("value", settings.stored_api_key())
                .set("class", "regular-text")
                .set("autocomplete", "off"),
        )
        .element(
            "p",
            &Attrs::new().set("class", "description"),
            "Your Hugging Face access token with inference permissions.",
        )
        .finalize()
}

pub fn routing_strategy_field(settings: &SettingsStore) -> String {
    let current = settings.routing_strategy();

    MarkupBuilder::new()
        .open(
            "select",
            &Attrs::new()
                .set("id", ROUTING_STRATEGY_OPTION)
                .set("name", ROUTING_STRATEGY_OPTION),
        )
        .each(RoutingStrategy::ALL, |b, strategy| {
            b.element(
                "option",
                &Attrs::new()
                    .set("value", strategy.as_str())
                    .flag_if("selected", strategy == current),
                strategy.label(),
            )
        })
        .close("select")
        .element(
            "p",
            &Attrs::new().set("class", "description"),
            "How the router picks an inference provider for each request.",
        )
        .finalize()
}

pub fn organization_field(settings: &SettingsStore) -> String {
    MarkupBuilder::new()
        .void(
            "input",
            &Attrs::new()
                .set("type", "text")
                .set("id", ORGANIZATION_OPTION)
                .set("name", ORGANIZATION_OPTION)
                .set("value", settings.organization())
                .set("class", "regular-text")
                .set("placeholder", "my-organization"),
        )
        .open("p", &Attrs::new().set("class", "description"))
        .text("Bill usage to this organization. Sent as the ")
        .element("code", &Attrs::new(), "X-HF-Bill-To")
        .text(" header; leave empty to bill your personal account.")
        .close("p")
        .finalize()
}

/// Model selector markup.
///
/// `fetch_error` is shown above the selector. With an empty catalog only a
/// hint to refresh is rendered.
pub fn model_field(
    selection: &Reconciliation,
    enabled: &[String],
    fetch_error: Option<&str>,
) -> String {
    let notice = MarkupBuilder::new().when(fetch_error.is_some(), |b| {
        b.open("div", &Attrs::new().set("class", "notice notice-error inline"))
            .element(
                "p",
                &Attrs::new(),
                format!("Failed to fetch models: {}", fetch_error.unwrap_or_default()),
            )
            .close("div")
    });

    if selection.is_empty() {
        return notice
            .open("p", &Attrs::new().set("class", "description"))
            .text("No models found. Try ")
            .element("strong", &Attrs::new(), "Refresh Model List")
            .text(" below.")
            .close("p")
            .finalize();
    }

    let enabled: HashSet<&str> = enabled.iter().map(String::as_str).collect();
    let stale = serde_json::to_string(&selection.stale).unwrap_or_else(|_| "[]".to_owned());
    let field_name = format!("{ENABLED_MODELS_OPTION}[]");

    notice
        .open(
            "div",
            &Attrs::new()
                .set("class", "model-selector")
                .set("data-default-collapsed", "true")
                .set("data-grouped", "true")
                .set("data-stale-models", stale),
        )
        .void(
            "input",
            &Attrs::new()
                .set("type", "text")
                .set("class", "model-selector__search")
                .set("placeholder", "Search models..."),
        )
        .open("div", &Attrs::new().set("class", "model-selector__chips"))
        .close("div")
        .open("div", &Attrs::new().set("class", "model-selector__panel"))
        .each(&selection.grouped, |b, (namespace, records)| {
            b.open(
                "div",
                &Attrs::new()
                    .set("class", "model-selector__group")
                    .set("data-group", namespace),
            )
            .open(
                "button",
                &Attrs::new()
                    .set("type", "button")
                    .set("class", "model-selector__group-header"),
            )
            .open("span", &Attrs::new().set("class", "model-selector__group-arrow"))
            .raw("&#9656;")
            .close("span")
            .element(
                "span",
                &Attrs::new().set("class", "model-selector__group-name"),
                namespace,
            )
            // Filled in by the script with the checked count.
            .open("span", &Attrs::new().set("class", "model-selector__group-count"))
            .close("span")
            .close("button")
            .open("div", &Attrs::new().set("class", "model-selector__group-body"))
            .each(records, |b, record| {
                b.open(
                    "label",
                    &Attrs::new()
                        .set("class", "model-selector__item")
                        .set("data-model-id", &record.id)
                        .set("data-model-name", &record.name),
                )
                .void(
                    "input",
                    &Attrs::new()
                        .set("type", "checkbox")
                        .set("name", &field_name)
                        .set("value", &record.id)
                        .flag_if("checked", enabled.contains(record.id.as_str())),
                )
                .element(
                    "span",
                    &Attrs::new().set("class", "model-selector__item-label"),
                    &record.id,
                )
                .close("label")
            })
            .close("div")
            .close("div")
        })
        .element(
            "p",
            &Attrs::new().set("class", "model-selector__no-results"),
            "No models match your search.",
        )
        .close("div")
        .close("div")
        .finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::ModelRecord, reconcile::reconcile, settings::ApiKeyResolver};
    use hf_provider_core::store::{MemoryCache, MemoryOptionStore, OptionStore};
    use serde_json::json;
    use std::sync::Arc;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_key(name: &str) -> Option<String> {
        (name == "HUGGINGFACE_API_KEY").then(|| "hf_fromenvironment1234".to_owned())
    }

    fn store(resolver: ApiKeyResolver) -> (Arc<MemoryOptionStore>, SettingsStore) {
        let options = Arc::new(MemoryOptionStore::new());
        let settings = SettingsStore::new(options.clone(), Arc::new(MemoryCache::new()), resolver);
        (options, settings)
    }

    #[test]
    fn api_key_input_when_stored() {
        let (options, settings) = store(ApiKeyResolver::new().with_env_lookup(no_env));
        options.set(CREDENTIALS_OPTION, json!({"huggingface": "hf_stored"}));

        let html = api_key_field(&settings);
        assert!(html.contains(r#"type="password""#));
        assert!(html.contains(r#"name="wp_ai_client_provider_credentials[huggingface]""#));
        assert!(html.contains(r#"value="hf_stored""#));
    }

    #[test]
    fn api_key_note_when_configured_externally() {
        let (_, settings) = store(ApiKeyResolver::new().with_env_lookup(env_key));

        let html = api_key_field(&settings);
        assert!(html.contains("Configured via HUGGINGFACE_API_KEY environment variable"));
        assert!(html.contains(&format!("<code>{}</code>", mask_api_key("hf_fromenvironment1234"))));
        assert!(!html.contains("<input"));
        assert!(!html.contains("hf_fromenvironment1234"));
    }

    #[test]
    fn routing_select_marks_current_strategy() {
        let (options, settings) = store(ApiKeyResolver::new().with_env_lookup(no_env));
        options.set(ROUTING_STRATEGY_OPTION, json!("cheapest"));

        let html = routing_strategy_field(&settings);
        assert!(html.contains(r#"<option value="cheapest" selected>Cheapest</option>"#));
        assert!(html.contains(r#"<option value="preferred">Preferred (default)</option>"#));
    }

    #[test]
    fn organization_input_escapes_value() {
        let (options, settings) = store(ApiKeyResolver::new().with_env_lookup(no_env));
        options.set(ORGANIZATION_OPTION, json!("acme"));

        let html = organization_field(&settings);
        assert!(html.contains(r#"value="acme""#));
        assert!(html.contains("<code>X-HF-Bill-To</code>"));
    }

    #[test]
    fn empty_catalog_shows_hint_and_error() {
        let html = model_field(&Reconciliation::default(), &[], Some("HTTP 401 <denied>"));

        assert!(html.contains("notice-error"));
        assert!(html.contains("Failed to fetch models: HTTP 401 &lt;denied&gt;"));
        assert!(html.contains("No models found."));
        assert!(!html.contains("model-selector"));
    }

    fn selection() -> (Reconciliation, Vec<String>) {
        let catalog: Vec<ModelRecord> = ["Qwen/Qwen3-8B", "meta-llama/Llama-3.1-8B", "gpt2"]
            .iter()
            .map(|id| ModelRecord::from_id(id))
            .collect();
        let enabled = vec!["Qwen/Qwen3-8B".to_owned(), "gone/model".to_owned()];
        (reconcile(&catalog, &enabled), enabled)
    }

    #[test]
    fn selector_groups_models_and_flags_stale() {
        let (selection, enabled) = selection();

        let html = model_field(&selection, &enabled, None);

        assert!(!html.contains("notice-error"));
        assert!(html.contains(r#"data-default-collapsed="true""#));
        assert!(html.contains(r#"data-grouped="true""#));
        assert!(html.contains(r#"data-stale-models="[&quot;gone/model&quot;]""#));
        assert_eq!(html.matches(r#"class="model-selector__group""#).count(), 3);
        assert!(html.contains(r#"data-group="Qwen""#));
        assert!(html.contains(r#"data-group="Other""#));
        assert!(html.contains(
            r#"name="huggingface_enabled_models[]" value="Qwen/Qwen3-8B" checked />"#
        ));
        assert!(html.contains(r#"name="huggingface_enabled_models[]" value="gpt2" />"#));
    }

    #[test]
    fn selector_markup_carries_every_hook_the_script_queries() {
        let (selection, enabled) = selection();

        let html = model_field(&selection, &enabled, None);

        for hook in [
            r#"class="model-selector""#,
            r#"<input type="text" class="model-selector__search" placeholder="Search models..." />"#,
            r#"<div class="model-selector__chips"></div>"#,
            r#"<div class="model-selector__panel">"#,
            r#"<div class="model-selector__group" data-group="meta-llama">"#,
            r#"<button type="button" class="model-selector__group-header">"#,
            r#"<span class="model-selector__group-arrow">&#9656;</span>"#,
            r#"<span class="model-selector__group-name">meta-llama</span>"#,
            r#"<span class="model-selector__group-count"></span>"#,
            r#"<div class="model-selector__group-body">"#,
            r#"<label class="model-selector__item" data-model-id="meta-llama/Llama-3.1-8B" data-model-name="meta-llama/Llama-3.1-8B">"#,
            r#"<span class="model-selector__item-label">meta-llama/Llama-3.1-8B</span>"#,
        ] {
            assert!(html.contains(hook), "missing {hook} in {html}");
        }

        // No-results sits inside the panel.
        let panel = html.find("model-selector__panel").expect("panel rendered");
        let no_results = html
            .find(r#"<p class="model-selector__no-results">No models match your search.</p>"#)
            .expect("no-results rendered");
        assert!(no_results > panel);
        assert!(html.ends_with("</p></div></div>"));
        assert!(!html.contains("<details"));
        assert!(!html.contains(" hidden"));
    }
}
