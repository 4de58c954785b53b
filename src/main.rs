mod cli;

use clap::Parser;
use cli::Cli;
use fundbridge::{auth::SharedNavigator, config::ClientConfig, App};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fundbridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url.as_deref() {
        config = config.with_api_url(api_url);
    }
    if let Some(session_file) = cli.session_file {
        config = config.with_session_file(session_file);
    }
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let app = App::new(config);

    // Watch the stored token for the lifetime of the command
    let role = app.session.role().unwrap_or(None);
    let initial = cli
        .command
        .route(role)
        .map(|route| route.path())
        .unwrap_or("/");
    let navigator = Arc::new(SharedNavigator::new(initial));
    let mut watcher = app.expiry_watcher(navigator.clone());
    watcher.start();

    let result = cli::run(app, cli.command, &navigator).await;

    watcher.shutdown().await;
    result
}
