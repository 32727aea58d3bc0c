use std::{collections::HashMap, sync::Arc};

use hf_provider::{
    HostContext, Plugin,
    host::{
        AdminHost, Asset, MenuPage, ProviderRegistry, RequestAuthentication, SettingRegistration,
    },
    provider::Provider,
    router::HuggingFaceProviderBuilder,
};
use tracing_subscriber::EnvFilter;

/// # Settings page in a toy host
///
/// Drives the plugin through every admin phase against an in-memory host and
/// prints the rendered settings page to stdout.
///
/// ```bash
/// export HUGGINGFACE_API_KEY=hf_…   # optional, the page renders without it
/// cargo run -p hf-provider --example huggingface_admin_page > page.html
/// ```
#[derive(Default)]
struct ToyHost {
    providers: Vec<Arc<dyn Provider>>,
    pages: Vec<MenuPage>,
    settings: Vec<SettingRegistration>,
}

impl ProviderRegistry for ToyHost {
    fn has_provider(&self, provider_id: &str) -> bool {
        self.providers.iter().any(|p| p.metadata().id == provider_id)
    }

    fn register_provider(&mut self, provider: Arc<dyn Provider>) {
        self.providers.push(provider);
    }

    fn set_provider_request_authentication(
        &mut self,
        provider_id: &str,
        _authentication: RequestAuthentication,
    ) {
        eprintln!("authentication configured for {provider_id}");
    }
}

impl AdminHost for ToyHost {
    fn current_user_can(&self, _capability: &str) -> bool {
        true
    }

    fn create_nonce(&self, action: &str) -> String {
        format!("{:x}", action.len() * 7919)
    }

    fn verify_nonce(&self, nonce: &str, action: &str) -> bool {
        nonce == self.create_nonce(action)
    }

    fn admin_url(&self, path: &str) -> String {
        format!("http://localhost:8080/wp-admin/{path}")
    }

    fn add_options_page(&mut self, page: MenuPage) {
        self.pages.push(page);
    }

    fn register_setting(&mut self, setting: SettingRegistration) {
        self.settings.push(setting);
    }

    fn enqueue_script(&self, asset: Asset) {
        eprintln!("script {} {}?ver={}", asset.handle, asset.path, asset.version);
    }

    fn enqueue_style(&self, asset: Asset) {
        eprintln!("style {} {}?ver={}", asset.handle, asset.path, asset.version);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let provider = HuggingFaceProviderBuilder::new_from_env().build()?;
    let plugin = Plugin::new(Arc::new(provider));

    let mut registry = ToyHost::default();
    let mut admin = ToyHost::default();
    let query = HashMap::new();

    for phase in Plugin::phases(true) {
        let ctx = HostContext {
            registry: &mut registry,
            admin: Some(&mut admin),
            query: &query,
        };
        let outcome = plugin.handle(phase, ctx);
        eprintln!("{phase:?}: {outcome:?}");
    }

    eprintln!(
        "{} provider(s), {} page(s), {} setting(s) registered",
        registry.providers.len(),
        admin.pages.len(),
        admin.settings.len()
    );

    match plugin.settings_page().render(&admin).await {
        Some(html) => println!("{html}"),
        None => anyhow::bail!("current user may not manage options"),
    }

    Ok(())
}
