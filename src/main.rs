use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaxtrack::{config::Config, db, infrastructure::AppState, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaxtrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize database
    let pool = db::init_db(&config)
        .await
        .expect("Failed to initialize database");

    let state = AppState::new(pool, &config);

    let addr: SocketAddr = format!("{}:{}", config.server_address, config.port)
        .parse()
        .expect("invalid server address");

    server::serve(state, addr)
        .await
        .expect("Failed to start server");
}
