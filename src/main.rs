use std::sync::Arc;

use mailgate::config::AppConfig;
use mailgate::github::GithubClient;
use mailgate::http::{AppState, routes};
use mailgate::mailer::SmtpNotifier;
use mailgate::pipeline::processor::{EmailProcessor, ProcessorConfig};
use mailgate::storage::HttpObjectStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    let github = Arc::new(GithubClient::new(
        config.tracker.token.clone(),
        config.tracker.api_base.clone(),
    ));
    let store = Arc::new(HttpObjectStore::new(&config.storage));
    let notifier = Arc::new(SmtpNotifier::new(config.smtp.clone()));

    let processor = Arc::new(EmailProcessor::new(
        store,
        github.clone(),
        notifier,
        ProcessorConfig {
            owner: config.tracker.owner.clone(),
            repo: config.tracker.repo.clone(),
            labels: config.tracker.labels.clone(),
            sender_identity: config.sender_identity,
        },
    ));

    tracing::info!(
        tracker = %format!("{}/{}", config.tracker.owner, config.tracker.repo),
        addr = %config.bind_addr,
        "mailgate starting"
    );

    let state = AppState {
        processor,
        github,
        namespace: config.namespace.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, routes(state)).await?;

    Ok(())
}
