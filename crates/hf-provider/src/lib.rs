//! # `hf-provider` – The umbrella crate
//!
//! One import for the whole Hugging Face provider:
//!
//! | Crate                      | What it provides                                                        |
//! |----------------------------|-------------------------------------------------------------------------|
//! | **`hf-provider-core`**     | Provider-agnostic traits, generic messages, option store and cache      |
//! | **`hf-provider-markup`**   | Escaping HTML builder used by the settings page                         |
//! | **`hf-provider-router`**   | Catalog, settings, chat mapping and admin page for the Hugging Face router |
//!
//! On top of that it adds [`plugin::Plugin`], which hooks the provider into a
//! host application's lifecycle.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use hf_provider::{
//!     ProviderClient,
//!     model::ModelConfig,
//!     router::HuggingFaceProviderBuilder,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = HuggingFaceProviderBuilder::new_from_env().build()?;
//!     let client = ProviderClient::new(provider);
//!
//!     for model in client.models().await? {
//!         println!("{}", model.id);
//!     }
//!
//!     let answer = client
//!         .generate_text("meta-llama/Llama-3.1-8B-Instruct", "Say hello!", ModelConfig::default())
//!         .await?;
//!     println!("{}", answer.to_text().unwrap_or_default());
//!     Ok(())
//! }
//! ```
#![doc(html_root_url = "https://docs.rs/hf-provider/latest")]

pub mod plugin;

pub use hf_provider_core::*;
pub use hf_provider_markup as markup;
pub use hf_provider_router as router;

pub use plugin::{HostContext, LifecyclePhase, PhaseOutcome, Plugin};
