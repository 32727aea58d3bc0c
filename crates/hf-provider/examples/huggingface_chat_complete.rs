use hf_provider::{
    ProviderClient,
    generic::Message,
    model::ModelConfig,
    router::{HuggingFaceProviderBuilder, settings::ENABLED_MODELS_OPTION},
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// # Chat completion through the Hugging Face router
///
/// Enables one model, then sends a short conversation through
/// [`ProviderClient::generate_text`]. The model id is sent upstream with the
/// configured routing strategy appended (`:preferred` by default).
///
/// ```bash
/// export HUGGINGFACE_API_KEY=hf_…   # mandatory
/// RUST_LOG=hf_provider_router=debug \
///   cargo run -p hf-provider --example huggingface_chat_complete
/// ```
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let model_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "meta-llama/Llama-3.1-8B-Instruct".to_owned());

    let provider = HuggingFaceProviderBuilder::new_from_env().build()?;
    let mut form = serde_json::Map::new();
    form.insert(ENABLED_MODELS_OPTION.to_owned(), json!([&model_id]));
    provider.settings().apply_submission(&form);

    let client = ProviderClient::new(provider);

    let prompt = vec![
        Message::user("Why is the Rust borrow checker important?"),
        Message::model("It prevents data races at compile time."),
        Message::user("Give me one more reason, in one sentence."),
    ];
    let config = ModelConfig::default()
        .with_system_instruction("You are a concise, witty assistant.")
        .with_max_tokens(128);

    let result = client.generate_text(&model_id, prompt, config).await?;

    match result.to_text() {
        Some(answer) => println!("Assistant: {answer}"),
        None => println!("Assistant returned no candidates"),
    }

    let usage = result.token_usage;
    println!(
        "Tokens – prompt: {}, completion: {}, total: {} ({})",
        usage.prompt_tokens, usage.completion_tokens, usage.total_tokens, result.model_id
    );

    Ok(())
}
