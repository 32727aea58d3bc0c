//! Collaborators supplied by the host application.
//!
//! Providers never own an event loop, a user session or an admin UI. They
//! receive these traits from the host and call into them while handling a
//! lifecycle phase.
use std::sync::Arc;

use serde_json::Value;

use crate::provider::Provider;

/// Credentials the host attaches to every outgoing provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAuthentication {
    ApiKey(String),
}

/// Registry of providers known to the host AI framework.
pub trait ProviderRegistry {
    fn has_provider(&self, provider_id: &str) -> bool;

    fn register_provider(&mut self, provider: Arc<dyn Provider>);

    fn set_provider_request_authentication(
        &mut self,
        provider_id: &str,
        authentication: RequestAuthentication,
    );
}

/// An entry in the host's settings menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPage {
    pub page_title: &'static str,
    pub menu_title: &'static str,
    pub capability: &'static str,
    pub slug: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingType {
    String,
    Array,
    Object,
}

/// Declares an option the host may accept from a settings form.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingRegistration {
    pub option_group: &'static str,
    pub option_name: &'static str,
    pub kind: SettingType,
    pub default: Value,
}

/// Static asset a rendered admin page depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub handle: &'static str,
    pub path: &'static str,
    pub version: &'static str,
}

/// Admin-side services: the current user, CSRF nonces, URLs and page
/// registration.
pub trait AdminHost {
    fn current_user_can(&self, capability: &str) -> bool;

    fn create_nonce(&self, action: &str) -> String;

    fn verify_nonce(&self, nonce: &str, action: &str) -> bool;

    /// Absolute URL of an admin-relative `path` (e.g. `options-general.php`).
    fn admin_url(&self, path: &str) -> String;

    fn add_options_page(&mut self, page: MenuPage);

    fn register_setting(&mut self, setting: SettingRegistration);

    fn enqueue_script(&self, asset: Asset);

    fn enqueue_style(&self, asset: Asset);
}
