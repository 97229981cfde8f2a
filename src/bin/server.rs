//! GoFood development server
//!
//! Serves the `/foods` resource the dashboard talks to, in the shape of a
//! json-server fake API.
//!
//! # Configuration
//!
//! Environment variables:
//! - `GOFOOD_PORT`: Port to listen on (default: 3333)
//! - `GOFOOD_DB_PATH`: JSON file to load plates from and save them to
//!   (default: none, plates live in memory only)
//!
//! # Database File Format
//!
//! ```json
//! { "foods": [ { "id": 1, "name": "X-Burger", "image": "...",
//!               "price": "10.00", "description": "...", "available": true } ] }
//! ```

use gofood::server::{router, FoodStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Server configuration
#[derive(Debug, Clone)]
struct Config {
    /// Port to listen on
    port: u16,
    /// JSON database file, if persistence is wanted
    db_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let port = std::env::var("GOFOOD_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3333);

        let db_path = std::env::var("GOFOOD_DB_PATH").ok().map(PathBuf::from);

        Self { port, db_path }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gofood=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let store = match &config.db_path {
        Some(path) => match FoodStore::open(path) {
            Ok(store) => {
                tracing::info!(
                    "Loaded {} food plate(s) from {}",
                    store.list().len(),
                    path.display()
                );
                store
            }
            Err(e) => {
                tracing::error!("Failed to open database: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!("No GOFOOD_DB_PATH set, keeping plates in memory");
            FoodStore::in_memory(Vec::new())
        }
    };

    let app = router(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
