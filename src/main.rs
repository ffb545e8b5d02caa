use std::sync::Arc;

use media_search_gateway::{
    api::{create_router, AppState},
    config::Config,
    services::YtDlpExtractor,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_search_gateway=debug,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let extractor = Arc::new(YtDlpExtractor::from_config(&config));
    let address = config.bind_address();
    let state = AppState::new(config, extractor);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %listener.local_addr()?, "Media search gateway listening");
    axum::serve(listener, app).await?;

    Ok(())
}
