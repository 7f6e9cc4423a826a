// Route exports
pub mod error;
pub mod matches;
pub mod profiles;
pub mod recommendations;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use crate::core::Recommender;
use crate::models::HealthResponse;
use crate::services::{CacheManager, PostgresClient};

pub use error::ApiError;

/// Page size bounds for recommendation lists
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_limit: u16,
    pub max_limit: u16,
}

impl PageLimits {
    /// Zero falls back to the default; anything else is capped at the max
    pub fn resolve(&self, requested: u16) -> usize {
        let limit = if requested == 0 { self.default_limit } else { requested };
        usize::from(limit.min(self.max_limit))
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub cache: Arc<CacheManager>,
    pub recommender: Recommender,
    pub limits: PageLimits,
}

impl AppState {
    /// Drop cached recommendation lists for the given users, logging failures
    pub(crate) async fn invalidate_users(&self, user_ids: &[&str]) {
        for user_id in user_ids {
            if let Err(e) = self.cache.invalidate_user(user_id).await {
                tracing::warn!("Failed to invalidate cache for {}: {}", user_id, e);
            }
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(profiles::configure)
            .configure(recommendations::configure)
            .configure(matches::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
