//! Host lifecycle glue.
//!
//! The host owns the event loop. It asks [`Plugin::phases`] which phases to
//! deliver and calls [`Plugin::handle`] once per phase with the collaborators
//! that phase may touch.
use std::{collections::HashMap, sync::Arc};

use hf_provider_core::{
    host::{AdminHost, ProviderRegistry, RequestAuthentication},
    provider::Provider,
};
use hf_provider_router::{
    HuggingFaceProvider,
    admin::{RefreshOutcome, SettingsPage},
    settings::PROVIDER_ID,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// Framework initialisation; runs on every request.
    Init,
    /// The host builds its admin menu.
    AdminMenu,
    /// Admin request bootstrap, before any output is sent.
    AdminInit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseOutcome {
    Done,
    /// The host should stop and redirect the browser.
    Redirect(String),
}

/// Collaborators available while a phase runs.
///
/// `admin` is `None` outside the admin area; admin phases are then no-ops.
pub struct HostContext<'a> {
    pub registry: &'a mut dyn ProviderRegistry,
    pub admin: Option<&'a mut dyn AdminHost>,
    pub query: &'a HashMap<String, String>,
}

/// The Hugging Face provider as seen by the host.
#[derive(Clone)]
pub struct Plugin {
    provider: Arc<HuggingFaceProvider>,
    page: SettingsPage,
}

impl Plugin {
    pub fn new(provider: Arc<HuggingFaceProvider>) -> Self {
        Self {
            page: SettingsPage::new(Arc::clone(&provider)),
            provider,
        }
    }

    pub fn provider(&self) -> &Arc<HuggingFaceProvider> {
        &self.provider
    }

    pub fn settings_page(&self) -> &SettingsPage {
        &self.page
    }

    /// Phases the host must deliver.
    pub fn phases(is_admin: bool) -> Vec<LifecyclePhase> {
        if is_admin {
            vec![
                LifecyclePhase::Init,
                LifecyclePhase::AdminMenu,
                LifecyclePhase::AdminInit,
            ]
        } else {
            vec![LifecyclePhase::Init]
        }
    }

    pub fn handle(&self, phase: LifecyclePhase, ctx: HostContext<'_>) -> PhaseOutcome {
        match phase {
            LifecyclePhase::Init => {
                self.register(ctx.registry);
                PhaseOutcome::Done
            }
            LifecyclePhase::AdminMenu => {
                if let Some(admin) = ctx.admin {
                    self.page.register_menu(admin);
                }
                PhaseOutcome::Done
            }
            LifecyclePhase::AdminInit => {
                let Some(admin) = ctx.admin else {
                    return PhaseOutcome::Done;
                };
                if let RefreshOutcome::Redirect(url) = self.page.handle_refresh(ctx.query, &*admin)
                {
                    return PhaseOutcome::Redirect(url);
                }
                self.page.register_settings(admin);
                PhaseOutcome::Done
            }
        }
    }

    fn register(&self, registry: &mut dyn ProviderRegistry) {
        if registry.has_provider(PROVIDER_ID) {
            tracing::debug!(provider = PROVIDER_ID, "provider already registered");
            return;
        }

        let provider: Arc<dyn Provider> = self.provider.clone();
        registry.register_provider(provider);
        tracing::info!(provider = PROVIDER_ID, "provider registered");

        let api_key = self.provider.settings().active_api_key();
        if !api_key.is_empty() {
            registry.set_provider_request_authentication(
                PROVIDER_ID,
                RequestAuthentication::ApiKey(api_key),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_provider_core::host::{Asset, MenuPage, SettingRegistration};
    use hf_provider_router::{
        HuggingFaceProviderBuilder,
        admin::{NONCE_QUERY_ARG, REFRESH_QUERY_ARG},
        settings::ApiKeyResolver,
    };

    #[derive(Default)]
    struct Registry {
        providers: Vec<String>,
        auth: Vec<(String, RequestAuthentication)>,
    }

    impl ProviderRegistry for Registry {
        fn has_provider(&self, provider_id: &str) -> bool {
            self.providers.iter().any(|id| id == provider_id)
        }

        fn register_provider(&mut self, provider: Arc<dyn Provider>) {
            self.providers.push(provider.metadata().id.to_owned());
        }

        fn set_provider_request_authentication(
            &mut self,
            provider_id: &str,
            authentication: RequestAuthentication,
        ) {
            self.auth.push((provider_id.to_owned(), authentication));
        }
    }

    #[derive(Default)]
    struct Admin {
        pages: Vec<MenuPage>,
        settings: Vec<SettingRegistration>,
    }

    impl AdminHost for Admin {
        fn current_user_can(&self, _capability: &str) -> bool {
            true
        }

        fn create_nonce(&self, action: &str) -> String {
            action.to_owned()
        }

        fn verify_nonce(&self, nonce: &str, action: &str) -> bool {
            nonce == action
        }

        fn admin_url(&self, path: &str) -> String {
            format!("/admin/{path}")
        }

        fn add_options_page(&mut self, page: MenuPage) {
            self.pages.push(page);
        }

        fn register_setting(&mut self, setting: SettingRegistration) {
            self.settings.push(setting);
        }

        fn enqueue_script(&self, _asset: Asset) {}

        fn enqueue_style(&self, _asset: Asset) {}
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn plugin(key: Option<&str>) -> Plugin {
        let mut builder = HuggingFaceProviderBuilder::new()
            .with_api_key_resolver(ApiKeyResolver::new().with_env_lookup(no_env));
        if let Some(key) = key {
            builder = builder.with_api_key_constant(key);
        }
        Plugin::new(Arc::new(builder.build().expect("provider builds")))
    }

    #[test]
    fn admin_context_subscribes_to_all_phases() {
        assert_eq!(Plugin::phases(false), vec![LifecyclePhase::Init]);
        assert_eq!(Plugin::phases(true).len(), 3);
    }

    #[test]
    fn init_registers_once_and_sets_auth() {
        let plugin = plugin(Some("hf_constant"));
        let mut registry = Registry::default();
        let query = HashMap::new();

        for _ in 0..2 {
            let ctx = HostContext {
                registry: &mut registry,
                admin: None,
                query: &query,
            };
            assert_eq!(plugin.handle(LifecyclePhase::Init, ctx), PhaseOutcome::Done);
        }

        assert_eq!(registry.providers, vec!["huggingface"]);
        assert_eq!(
            registry.auth,
            vec![(
                "huggingface".to_owned(),
                RequestAuthentication::ApiKey("hf_constant".to_owned())
            )]
        );
    }

    #[test]
    fn init_leaves_preregistered_provider_alone() {
        let plugin = plugin(Some("hf_constant"));
        let mut registry = Registry {
            providers: vec!["huggingface".to_owned()],
            ..Registry::default()
        };
        let query = HashMap::new();

        let ctx = HostContext {
            registry: &mut registry,
            admin: None,
            query: &query,
        };
        assert_eq!(plugin.handle(LifecyclePhase::Init, ctx), PhaseOutcome::Done);

        assert_eq!(registry.providers, vec!["huggingface"]);
        assert!(registry.auth.is_empty());
    }

    #[test]
    fn init_without_key_skips_auth() {
        let plugin = plugin(None);
        let mut registry = Registry::default();
        let query = HashMap::new();

        plugin.handle(
            LifecyclePhase::Init,
            HostContext {
                registry: &mut registry,
                admin: None,
                query: &query,
            },
        );

        assert_eq!(registry.providers.len(), 1);
        assert!(registry.auth.is_empty());
    }

    #[test]
    fn admin_phases_register_page_and_settings() {
        let plugin = plugin(None);
        let mut registry = Registry::default();
        let mut admin = Admin::default();
        let query = HashMap::new();

        for phase in [LifecyclePhase::AdminMenu, LifecyclePhase::AdminInit] {
            let outcome = plugin.handle(
                phase,
                HostContext {
                    registry: &mut registry,
                    admin: Some(&mut admin),
                    query: &query,
                },
            );
            assert_eq!(outcome, PhaseOutcome::Done);
        }

        assert_eq!(admin.pages.len(), 1);
        assert_eq!(admin.pages[0].capability, "manage_options");
        assert_eq!(admin.settings.len(), 4);
    }

    #[test]
    fn admin_init_redirects_on_refresh() {
        let plugin = plugin(None);
        let mut registry = Registry::default();
        let mut admin = Admin::default();
        let query: HashMap<String, String> = [
            (REFRESH_QUERY_ARG.to_owned(), "1".to_owned()),
            (NONCE_QUERY_ARG.to_owned(), "huggingface_refresh_models".to_owned()),
        ]
        .into_iter()
        .collect();

        let outcome = plugin.handle(
            LifecyclePhase::AdminInit,
            HostContext {
                registry: &mut registry,
                admin: Some(&mut admin),
                query: &query,
            },
        );

        assert_eq!(
            outcome,
            PhaseOutcome::Redirect("/admin/options-general.php?page=huggingface-provider".to_owned())
        );
        assert!(admin.settings.is_empty());
    }
}
