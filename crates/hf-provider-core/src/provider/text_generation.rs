use std::{future::Future, pin::Pin};

use futures_core::stream::Stream;

use crate::{
    error::Result,
    generic::{GenerativeAiResult, Message},
    model::{ModelConfig, ModelMetadata},
};

/// Stream of partial results produced by a streaming generation.
pub type GenerativeAiResultStream<'s> =
    Pin<Box<dyn Stream<Item = Result<GenerativeAiResult>> + Send + 's>>;

/// A model that turns a chat prompt into generated text.
///
/// * **`generate_text`** performs a single non-streaming round-trip.
/// * **`stream_generate_text`** is part of the contract so hosts can probe
///   for it; backends without streaming return
///   [`ProviderError::Unimplemented`](crate::error::ProviderError).
pub trait TextGenerationModel: Send + Sync {
    fn metadata(&self) -> &ModelMetadata;

    fn config(&self) -> &ModelConfig;

    fn set_config(&mut self, config: ModelConfig);

    fn generate_text<'a>(
        &'a self,
        prompt: Vec<Message>,
    ) -> Pin<Box<dyn Future<Output = Result<GenerativeAiResult>> + Send + 'a>>;

    fn stream_generate_text<'a>(
        &'a self,
        prompt: Vec<Message>,
    ) -> Result<GenerativeAiResultStream<'a>>;
}
