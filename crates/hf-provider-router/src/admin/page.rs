use std::{collections::HashMap, sync::Arc};

use hf_provider_core::host::{AdminHost, MenuPage};
use hf_provider_markup::{
    builder::{Attrs, MarkupBuilder},
    chain::MarkupChain,
};

use super::{
    MANAGE_CAPABILITY, MODEL_SELECTOR_SCRIPT, MODEL_SELECTOR_STYLE, NONCE_QUERY_ARG, PAGE_SLUG,
    PAGE_TITLE, REFRESH_NONCE_ACTION, REFRESH_QUERY_ARG, RefreshOutcome, SETTINGS_PATH,
    TOKENS_URL, fields, handle_refresh,
};
use crate::{
    adapter::HuggingFaceProvider,
    settings::{
        ENABLED_MODELS_OPTION, OPTION_GROUP, ORGANIZATION_OPTION, ROUTING_STRATEGY_OPTION,
        SettingsStore,
    },
};

/// The `Hugging Face` options page.
#[derive(Clone)]
pub struct SettingsPage {
    provider: Arc<HuggingFaceProvider>,
}

impl SettingsPage {
    pub fn new(provider: Arc<HuggingFaceProvider>) -> Self {
        Self { provider }
    }

    pub fn menu_page() -> MenuPage {
        MenuPage {
            page_title: PAGE_TITLE,
            menu_title: PAGE_TITLE,
            capability: MANAGE_CAPABILITY,
            slug: PAGE_SLUG,
        }
    }

    pub fn register_menu(&self, host: &mut dyn AdminHost) {
        host.add_options_page(Self::menu_page());
    }

    /// Whitelist every option the form submits.
    pub fn register_settings(&self, host: &mut dyn AdminHost) {
        for registration in SettingsStore::registrations() {
            host.register_setting(registration);
        }
    }

    pub fn handle_refresh(
        &self,
        query: &HashMap<String, String>,
        host: &dyn AdminHost,
    ) -> RefreshOutcome {
        handle_refresh(query, host, self.provider.catalog())
    }

    /// Render the page, or `None` when the user may not manage options.
    ///
    /// Fetches the catalog (served from cache when warm) and enqueues the
    /// selector assets when there is something to select.
    pub async fn render(&self, host: &dyn AdminHost) -> Option<String> {
        if !host.current_user_can(MANAGE_CAPABILITY) {
            return None;
        }

        let settings = self.provider.settings();
        let (_, selection) = self.provider.model_selection().await;
        let fetch_error = self.provider.catalog().last_error();

        if !selection.is_empty() {
            host.enqueue_script(MODEL_SELECTOR_SCRIPT);
            host.enqueue_style(MODEL_SELECTOR_STYLE);
        }

        let rows = [
            (fields::API_KEY_FIELD_ID, "API Key", fields::api_key_field(settings)),
            (
                ROUTING_STRATEGY_OPTION,
                "Routing Strategy",
                fields::routing_strategy_field(settings),
            ),
            (
                ORGANIZATION_OPTION,
                "Organization",
                fields::organization_field(settings),
            ),
            (
                ENABLED_MODELS_OPTION,
                "Models",
                fields::model_field(&selection, &settings.enabled_models(), fetch_error.as_deref()),
            ),
        ];

        let form = MarkupBuilder::new()
            .open(
                "form",
                &Attrs::new()
                    .set("method", "post")
                    .set("action", host.admin_url("options.php")),
            )
            .void("input", &hidden("option_page", OPTION_GROUP))
            .void("input", &hidden("action", "update"))
            .void(
                "input",
                &hidden(
                    NONCE_QUERY_ARG,
                    host.create_nonce(&format!("{OPTION_GROUP}-options")),
                ),
            )
            .element("h2", &Attrs::new(), "Settings")
            .raw(fields::section_description())
            .open(
                "table",
                &Attrs::new()
                    .set("class", "form-table")
                    .set("role", "presentation"),
            )
            .each(rows, |b, (id, title, field)| {
                b.open("tr", &Attrs::new())
                    .open("th", &Attrs::new().set("scope", "row"))
                    .element("label", &Attrs::new().set("for", id), title)
                    .close("th")
                    .open("td", &Attrs::new())
                    .raw(field)
                    .close("td")
                    .close("tr")
            })
            .close("table")
            .open("p", &Attrs::new().set("class", "submit"))
            .void(
                "input",
                &Attrs::new()
                    .set("type", "submit")
                    .set("name", "submit")
                    .set("id", "submit")
                    .set("class", "button button-primary")
                    .set("value", "Save Settings"),
            )
            .close("p")
            .close("form");

        Some(
            MarkupChain::new()
                .with(r#"<div class="wrap">"#)
                .with(MarkupBuilder::new().element("h1", &Attrs::new(), PAGE_TITLE))
                .with(form)
                .with(info_card(host))
                .with("</div>")
                .build(),
        )
    }
}

fn hidden(name: &str, value: impl std::fmt::Display) -> Attrs {
    Attrs::new()
        .set("type", "hidden")
        .set("name", name)
        .set("value", value)
}

fn refresh_url(host: &dyn AdminHost) -> String {
    let nonce = host.create_nonce(REFRESH_NONCE_ACTION);
    host.admin_url(&format!(
        "{SETTINGS_PATH}?page={PAGE_SLUG}&{REFRESH_QUERY_ARG}=1&{NONCE_QUERY_ARG}={nonce}"
    ))
}

fn info_card(host: &dyn AdminHost) -> MarkupBuilder {
    MarkupBuilder::new()
        .open(
            "div",
            &Attrs::new()
                .set("class", "card")
                .set("style", "max-width: 600px; margin-top: 20px;"),
        )
        .element("h2", &Attrs::new(), "About Hugging Face")
        .element(
            "p",
            &Attrs::new(),
            "Hugging Face Inference Providers: unified API gateway routing requests across multiple inference providers with automatic failover.",
        )
        .open("p", &Attrs::new())
        .element(
            "a",
            &Attrs::new()
                .set("href", refresh_url(host))
                .set("class", "button"),
            "Refresh Model List",
        )
        .text(" ")
        .element(
            "a",
            &Attrs::new()
                .set("href", TOKENS_URL)
                .set("class", "button")
                .set("target", "_blank")
                .set("rel", "noopener noreferrer"),
            "Get API Token",
        )
        .close("p")
        .close("div")
}
