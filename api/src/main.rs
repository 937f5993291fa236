use tracing::info;
use tweet_service::{app, config::Config, services::db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let store = db::connect_store(&config).await?;

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, app(store)).await?;

    Ok(())
}
