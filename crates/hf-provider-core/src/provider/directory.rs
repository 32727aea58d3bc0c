use std::{future::Future, pin::Pin};

use crate::{error::Result, model::ModelMetadata};

/// Boxed future returned by directory lookups. Object safe without pulling
/// in `async_trait`.
pub type DirectoryFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Lists the models a provider is willing to serve.
///
/// Implementations usually sit on top of a remote catalog, so every lookup is
/// asynchronous. Missing ids are reported as
/// [`ProviderError::ModelNotFound`](crate::error::ProviderError).
pub trait ModelMetadataDirectory: Send + Sync {
    fn list_model_metadata(&self) -> DirectoryFuture<'_, Vec<ModelMetadata>>;

    fn has_model_metadata<'a>(&'a self, model_id: &'a str) -> DirectoryFuture<'a, bool>;

    fn get_model_metadata<'a>(&'a self, model_id: &'a str) -> DirectoryFuture<'a, ModelMetadata>;
}
