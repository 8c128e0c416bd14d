use pokedex_client::client::HttpFetcher;
use pokedex_client::config::load_config;
use pokedex_client::diagnostics::TracingSink;
use pokedex_client::server::{AppState, router};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format!(
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let fetcher = match HttpFetcher::new(&config.pokemon) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!("Failed to build upstream client: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = Arc::new(AppState::new(
        Arc::new(fetcher),
        &config,
        Arc::new(TracingSink),
    ));
    let app = router(app_state);

    let listener = match tokio::net::TcpListener::bind(&config.server.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", config.server.bind, e);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(addr) => tracing::info!("listening on {}, upstream {}", addr, config.pokemon.api_url),
        Err(e) => tracing::warn!("listening, but local address is unavailable: {}", e),
    }

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
