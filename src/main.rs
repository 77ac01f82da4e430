// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, logging and provider clients, then start the HTTP server

mod config;
mod errors;
mod handlers;
mod logging;
mod models;
mod services;
mod state;

#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use config::Config;
use state::AppState;
use std::time::Duration;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration (.env first, then the process environment)
    let config = Config::from_env();

    // 2. Initialize logging
    logging::init(&config);

    // 3. Refuse to start on invalid configuration
    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        anyhow::bail!("configuration error: {}", e);
    }

    log::info!("Starting universal translator service...");
    log::info!("Environment: {}", config.environment);
    log::info!("Server Address: {}", config.bind_address());
    log::info!(
        "Workers: {}, search radius: {} m, retries: {} x {} ms",
        config.workers,
        config.search_radius_m,
        config.retry_max_attempts,
        config.retry_delay_ms
    );

    // 4. Build provider clients once, shared by every worker
    let state = web::Data::new(
        AppState::from_config(&config).context("failed to build provider clients")?,
    );

    // 5. Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_header()
            .allow_any_method()
            .allow_any_origin();

        App::new()
            .app_data(state.clone())
            // Middleware
            .wrap(cors)
            .wrap(Logger::default())
            // Routes
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .workers(config.workers)
    .backlog(2048)
    .max_connections(1000)
    .keep_alive(Duration::from_secs(2))
    .client_request_timeout(config.request_timeout())
    .bind(config.bind_address())
    .with_context(|| format!("failed to bind {}", config.bind_address()))?
    .run()
    .await?;

    Ok(())
}
