// src/handlers/home.rs
// DOCUMENTATION: Home page handler
// PURPOSE: Serve the static single-page frontend

use crate::errors::AppError;
use crate::state::AppState;
use actix_web::{http::header::ContentType, web, HttpResponse};

/// GET /
/// Serve templates/index.html
pub async fn home(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let path = state.templates_dir.join("index.html");

    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(html)),
        Err(e) => {
            log::error!("Error rendering home page: {}", e);
            log::error!("Template path: {}", path.display());
            Err(AppError::PageUnavailable(format!("{}: {}", path.display(), e)))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(home))
            .default_service(web::to(crate::handlers::method_not_allowed)),
    );
}
