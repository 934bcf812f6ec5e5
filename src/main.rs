use boostfront::notify::{DiscordNotifier, Notifier, NullNotifier};
use boostfront::orders::{OrderService, SystemClock};
use boostfront::store::SqliteOrderStore;
use boostfront::{api, config::Config};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    // Initialize the order store
    let store = match SqliteOrderStore::connect(&config.database_path).await {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("Failed to initialize order store: {}", e);
            std::process::exit(1);
        }
    };

    let service = Arc::new(OrderService::new(
        store,
        Arc::new(SystemClock),
        config.expiry_window_ms(),
    ));

    let notifier: Arc<dyn Notifier> = match &config.discord_webhook_url {
        Some(url) => Arc::new(DiscordNotifier::new(url.clone())),
        None => {
            tracing::info!("No Discord webhook configured, notifications disabled");
            Arc::new(NullNotifier)
        }
    };

    // Create router
    let app = api::create_router(api::AppState::new(config, service, notifier));

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
