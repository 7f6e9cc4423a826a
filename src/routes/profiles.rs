use actix_web::{web, HttpResponse};
use crate::models::MatchProfile;
use crate::routes::{ApiError, AppState};

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profiles", web::put().to(upsert_profile))
        .route("/profiles/{user_id}", web::get().to(get_profile));
}

/// Create or replace a profile
///
/// PUT /api/v1/profiles
///
/// Any other user's cached recommendations may now include, drop or
/// rescore this profile, so every cached list is invalidated.
async fn upsert_profile(
    state: web::Data<AppState>,
    req: web::Json<MatchProfile>,
) -> Result<HttpResponse, ApiError> {
    let profile = req.into_inner();
    if profile.user_id.trim().is_empty() {
        return Err(ApiError::Validation("userId must not be empty".to_string()));
    }

    let stored = state.postgres.upsert_profile(&profile).await?;

    if let Err(e) = state.cache.invalidate_all().await {
        tracing::warn!("Failed to invalidate recommendation cache: {}", e);
    }

    tracing::info!(
        "Saved profile {} ({} languages, active: {})",
        stored.user_id,
        stored.programming_language.len(),
        stored.is_active
    );

    Ok(HttpResponse::Ok().json(stored))
}

/// Fetch a profile
///
/// GET /api/v1/profiles/{userId}
async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let profile = state.postgres.get_profile(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}
