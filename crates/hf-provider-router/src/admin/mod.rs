//! Server-rendered admin settings page.
//!
//! Only markup and data attributes are produced here. Searching, collapsing
//! groups and the selection chips are handled by the `model-selector` browser
//! script the page enqueues.
pub mod fields;
mod page;
mod refresh;

pub use page::SettingsPage;
pub use refresh::{RefreshOutcome, handle_refresh};

use hf_provider_core::host::{AdminHost, Asset};

pub const PAGE_SLUG: &str = "huggingface-provider";
pub const PAGE_TITLE: &str = "Hugging Face";
pub const MANAGE_CAPABILITY: &str = "manage_options";
pub const SETTINGS_PATH: &str = "options-general.php";

pub const REFRESH_QUERY_ARG: &str = "huggingface_refresh_models";
pub const REFRESH_NONCE_ACTION: &str = "huggingface_refresh_models";
pub const NONCE_QUERY_ARG: &str = "_wpnonce";

pub const TOKENS_URL: &str = "https://huggingface.co/settings/tokens";

pub const MODEL_SELECTOR_SCRIPT: Asset = Asset {
    handle: "huggingface-model-selector",
    path: "assets/model-selector.js",
    version: env!("CARGO_PKG_VERSION"),
};

pub const MODEL_SELECTOR_STYLE: Asset = Asset {
    handle: "huggingface-model-selector",
    path: "assets/model-selector.css",
    version: env!("CARGO_PKG_VERSION"),
};

/// Absolute URL of the settings page.
pub fn settings_page_url(host: &dyn AdminHost) -> String {
    host.admin_url(&format!("{SETTINGS_PATH}?page={PAGE_SLUG}"))
}
