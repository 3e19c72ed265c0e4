//! Postcode API server entry point.
//!
//! # Responsibility
//! - Read configuration, start logging and load the postcode pool once.
//! - Serve the search route until Ctrl-C.

use aupostcode_core::{init_logging, PostcodeService};
use aupostcode_server::config::ServerConfig;
use aupostcode_server::routes::{create_router, AppState};
use aupostcode_server::build_pool;
use log::{error, info};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, &config.log_dir)?;

    let pool = Arc::new(build_pool(&config));
    let loader = Arc::clone(&pool);
    // An empty pool still serves: every search answers 404 until a load succeeds.
    match tokio::task::spawn_blocking(move || loader.load(false)).await? {
        Ok(outcome) => println!("Loaded {} postcodes into pool.", outcome.count()),
        Err(err) => {
            error!("event=server_start module=server status=degraded error={err}");
            eprintln!("postcode pool not loaded: {err}");
        }
    }

    let app = create_router(AppState {
        service: PostcodeService::new(pool),
    });

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        "event=server_start module=server status=ok bind={}",
        config.bind
    );
    println!("aupostcode-server listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=server_stop module=server status=error error={err}");
    }
}
