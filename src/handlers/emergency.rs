// src/handlers/emergency.rs
// DOCUMENTATION: HTTP handler for nearest emergency services
// PURPOSE: Validate the caller's coordinates and return the closest police, hospital and fire services

use crate::errors::AppError;
use crate::handlers::method_not_allowed;
use crate::models::{NearestServices, NearestServicesRequest};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// POST /api/emergency/nearest
/// Nearest service per category, null where nothing was found in range
pub async fn nearest_services(
    state: web::Data<AppState>,
    req: web::Json<NearestServicesRequest>,
) -> Result<impl Responder, AppError> {
    req.validate()?;

    let origin = req.coordinate().ok_or_else(|| {
        AppError::LookupFailed("coordinates missing after validation".to_string())
    })?;

    log::info!(
        "Nearest services lookup at {} (radius {} m)",
        origin,
        state.resolver.radius_m()
    );

    let resolver = &state.resolver;
    let services = match state
        .retry
        .retry("find_nearest_services", || resolver.find_all(origin))
        .await
    {
        Ok(services) => services,
        Err(e) => {
            log::warn!("Place search unavailable for {}: {}", origin, e);
            NearestServices::default()
        }
    };

    Ok(HttpResponse::Ok().json(services))
}

/// Configuration for emergency routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/emergency").service(
            web::resource("/nearest")
                .route(web::post().to(nearest_services))
                .default_service(web::to(method_not_allowed)),
        ),
    );
}
