// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and wire every route into the app

use crate::errors::AppError;
use actix_web::{web, HttpResponse};

/// Build a test service with the full route table and the given state
#[cfg(test)]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .configure(crate::handlers::configure)
                .default_service(actix_web::web::to(crate::handlers::not_found)),
        )
        .await
    };
}

pub mod emergency;
pub mod health;
pub mod home;
pub mod translation;

pub use emergency::config as emergency_config;
pub use health::config as health_config;
pub use home::config as home_config;
pub use translation::config as translation_config;

/// Register all routes plus the JSON extractor error handler
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    )
    .configure(home_config)
    .configure(health_config)
    .configure(translation_config)
    .configure(emergency_config);
}

/// Fallback for unknown paths
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}

/// Resource default for a known path called with an unsupported method
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}
