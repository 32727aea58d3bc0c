use hf_provider::router::HuggingFaceProviderBuilder;
use tracing_subscriber::EnvFilter;

/// # Browse the model catalog
///
/// Fetches the router's model list, groups it by namespace and prints every
/// group. An optional argument filters ids and names case-insensitively.
///
/// ```bash
/// export HUGGINGFACE_API_KEY=hf_…
/// cargo run -p hf-provider --example huggingface_catalog -- qwen
/// ```
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let query = std::env::args().nth(1).unwrap_or_default();
    let provider = HuggingFaceProviderBuilder::new_from_env().build()?;

    let (models, selection) = provider.model_selection().await;
    if let Some(error) = provider.catalog().last_error() {
        anyhow::bail!("could not load models: {error}");
    }

    let selection = selection.filtered(&query);
    println!("{} models listed upstream", models.len());
    for (namespace, records) in &selection.grouped {
        println!("\n{namespace} ({})", records.len());
        for record in records {
            println!("  {}", record.id);
        }
    }

    Ok(())
}
