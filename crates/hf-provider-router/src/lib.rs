//! Hugging Face inference router backend.
//!
//! Everything specific to `router.huggingface.co` lives here: the catalog of
//! listed models, persisted settings, the OpenAI-compatible chat mapping and
//! the admin settings page. The host-facing traits come from
//! [`hf_provider_core`].
mod adapter;
mod directory;
mod provider_impl;
mod text_generation;

pub use adapter::{BASE_URL_ENV, HuggingFaceProvider, HuggingFaceProviderBuilder};
pub use directory::{HuggingFaceModelDirectory, MODEL_CAPABILITIES, MODEL_OPTIONS};
pub use provider_impl::{HuggingFaceAvailability, PROVIDER_METADATA};
pub use text_generation::HuggingFaceTextGenerationModel;

pub mod admin;
pub mod api_v1;
pub mod catalog;
pub mod client;
pub mod error;
pub mod reconcile;
pub mod settings;

pub use catalog::{ModelCatalog, ModelRecord};
pub use client::HuggingFaceClient;
pub use reconcile::{Reconciliation, reconcile};
pub use settings::{RoutingStrategy, SettingsStore};
