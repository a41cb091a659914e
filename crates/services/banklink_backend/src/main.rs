// File: services/banklink_backend/src/main.rs
use banklink_backend::{build_app, service_factory::BanklinkServiceFactory};
use banklink_common::logging;
use banklink_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init();

    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            logging::log_error(e, "Failed to load config");
            std::process::exit(1);
        }
    };

    let factory = BanklinkServiceFactory::new(&config);
    let app = build_app(config.clone(), &factory);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
