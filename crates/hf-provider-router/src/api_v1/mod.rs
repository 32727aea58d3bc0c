mod chat_completion;
mod common;
mod models;

pub use chat_completion::*;
pub use common::Usage;
pub use models::*;
