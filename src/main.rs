//! crosslike - automation client for a dating-platform crossings API

// Use the library crate for all modules
use crosslike::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (INFO level by default, use RUST_LOG to adjust)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Run CLI
    cli::run().await
}
