//! Provider-agnostic building blocks for exposing an inference backend to a
//! host AI framework.
//!
//! | Module          | What it provides                                              |
//! |-----------------|---------------------------------------------------------------|
//! | [`generic`]     | Prompt turns, message parts, generation results               |
//! | [`model`]       | Model and provider metadata, per-request [`model::ModelConfig`] |
//! | [`provider`]    | `Provider`, directory and text-generation traits             |
//! | [`store`]       | Option store and TTL cache abstractions (+ in-memory impls)   |
//! | [`host`]        | Host collaborators: provider registry, admin services         |
//! | [`client`]      | [`ProviderClient`], a small host-side driver                  |
pub mod client;
pub mod error;
pub mod generic;
pub mod host;
pub mod model;
pub mod provider;
pub mod schema_util;
pub mod store;
pub mod template;

pub use client::ProviderClient;
