use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::{ensure_can_remove, open_match, respond, MatchError};
use crate::models::{CreateMatchRequest, DeletedResponse, MatchesResponse, RespondMatchRequest, UserQuery};
use crate::routes::{ApiError, AppState};
use crate::services::StoreError;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/matches", web::get().to(list_matches))
        .route("/matches", web::post().to(create_match))
        .route("/matches/{id}", web::patch().to(respond_to_match))
        .route("/matches/{id}", web::delete().to(remove_match));
}

/// List a user's matches in any status
///
/// GET /api/v1/matches?userId={userId}
async fn list_matches(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let matches = state.postgres.get_matches_for_user(&query.user_id).await?;

    Ok(HttpResponse::Ok().json(MatchesResponse {
        user_id: query.user_id.clone(),
        count: matches.len(),
        matches,
    }))
}

/// Send a match request
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "targetUserId": "string"
/// }
/// ```
async fn create_match(
    state: web::Data<AppState>,
    req: web::Json<CreateMatchRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    if req.user_id == req.target_user_id {
        return Err(MatchError::SelfMatch.into());
    }

    let initiator = load_profile(&state, &req.user_id).await?;
    let recipient = load_profile(&state, &req.target_user_id).await?;
    let existing = state.postgres.get_matches_for_user(&req.user_id).await?;

    // Snapshot taken from the initiator's side
    let score = state.recommender.score(&initiator, &recipient);
    let record = open_match(&initiator, &recipient, &existing, score)?;

    state.postgres.insert_match(&record).await?;
    state.invalidate_users(&[record.user_a.as_str(), record.user_b.as_str()]).await;

    tracing::info!(
        "Match {} requested: {} -> {} (score {})",
        record.id,
        record.user_a,
        record.user_b,
        record.score
    );

    Ok(HttpResponse::Created().json(record))
}

/// Accept or reject a pending match
///
/// PATCH /api/v1/matches/{id}
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "status": "accepted|rejected"
/// }
/// ```
async fn respond_to_match(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
    req: web::Json<RespondMatchRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let id = path.into_inner();
    let mut record = state.postgres.get_match(id).await?;
    let previous = record.status;
    respond(&mut record, &req.user_id, req.status)?;

    if !state.postgres.update_match_status(&record, previous).await? {
        // A concurrent response or removal got there first
        let current = state.postgres.get_match(id).await?;
        return Err(MatchError::InvalidTransition {
            from: current.status,
            to: req.status,
        }
        .into());
    }
    state.invalidate_users(&[record.user_a.as_str(), record.user_b.as_str()]).await;

    tracing::info!("Match {} {} by {}", record.id, record.status, req.user_id);

    Ok(HttpResponse::Ok().json(record))
}

/// Remove a match; either participant may do this
///
/// DELETE /api/v1/matches/{id}?userId={userId}
async fn remove_match(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let id = path.into_inner();
    let record = state.postgres.get_match(id).await?;
    ensure_can_remove(&record, &query.user_id)?;

    if !state.postgres.delete_match(id).await? {
        return Err(StoreError::NotFound(format!("Match not found: {}", id)).into());
    }
    state.invalidate_users(&[record.user_a.as_str(), record.user_b.as_str()]).await;

    tracing::info!("Match {} removed by {}", id, query.user_id);

    Ok(HttpResponse::Ok().json(DeletedResponse {
        success: true,
        id: id.to_string(),
    }))
}

async fn load_profile(state: &AppState, user_id: &str) -> Result<crate::models::MatchProfile, ApiError> {
    state.postgres.get_profile(user_id).await.map_err(|e| match e {
        StoreError::NotFound(_) => MatchError::ProfileNotFound(user_id.to_string()).into(),
        other => other.into(),
    })
}
