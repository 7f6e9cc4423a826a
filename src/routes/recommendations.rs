use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::{exclude_linked, MatchError};
use crate::models::{Match, RecommendationsRequest, RecommendationsResponse, ScoredProfile};
use crate::routes::{ApiError, AppState};
use crate::services::{CacheError, CacheKey, StoreError};

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::post().to(recommend));
}

/// Ranked coding-partner recommendations
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 20,
///   "offset": 0,
///   "level": "BEGINNER|INTERMEDIATE|ADVANCED",
///   "location": "string",
///   "search": "string",
///   "honorPreferredLevel": false
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendationsRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let user_id = &req.user_id;
    let limit = state.limits.resolve(req.limit);
    let cache_key = CacheKey::recommendations(user_id, &req.filter);

    tracing::info!("Recommending partners for user: {}, limit: {}, offset: {}", user_id, limit, req.offset);

    // Loaded on every request; a cached ranking may predate the latest match
    let existing_matches = state.postgres.get_matches_for_user(user_id).await?;

    let ranked: Vec<ScoredProfile> = match state.cache.get(&cache_key).await {
        Ok(cached) => cached,
        Err(e) => {
            if !matches!(e, CacheError::CacheMiss(_)) {
                tracing::warn!("Cache read failed for {}, recomputing: {}", user_id, e);
            }

            let ranked = compute_ranking(&state, &req, &existing_matches).await?;

            if let Err(e) = state.cache.set(&cache_key, &ranked).await {
                tracing::warn!("Failed to cache recommendations for {}: {}", user_id, e);
            }
            ranked
        }
    };

    let ranked = exclude_linked(user_id, ranked, &existing_matches);
    let response = paginate(ranked, req.offset, limit);

    tracing::info!(
        "Returning {} recommendations for user {} (of {})",
        response.recommendations.len(),
        user_id,
        response.total_results
    );

    Ok(HttpResponse::Ok().json(response))
}

/// Cut one page out of a full ranking
pub fn paginate(ranked: Vec<ScoredProfile>, offset: usize, limit: usize) -> RecommendationsResponse {
    let total_results = ranked.len();
    let recommendations: Vec<ScoredProfile> = ranked.into_iter().skip(offset).take(limit).collect();
    let has_more = offset.saturating_add(recommendations.len()) < total_results;

    RecommendationsResponse {
        recommendations,
        total_results,
        has_more,
    }
}

async fn compute_ranking(
    state: &AppState,
    req: &RecommendationsRequest,
    existing_matches: &[Match],
) -> Result<Vec<ScoredProfile>, ApiError> {
    let user_id = &req.user_id;

    let subject = state.postgres.get_profile(user_id).await.map_err(|e| match e {
        StoreError::NotFound(_) => ApiError::Match(MatchError::ProfileNotFound(user_id.clone())),
        other => ApiError::Store(other),
    })?;

    let candidates = state.postgres.list_other_profiles(user_id).await?;

    tracing::debug!(
        "Scoring {} candidates for {} ({} existing matches)",
        candidates.len(),
        user_id,
        existing_matches.len()
    );

    let result = state
        .recommender
        .recommend_filtered(&subject, candidates, existing_matches, &req.filter);

    Ok(result.recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchProfile;
    use crate::routes::PageLimits;

    fn ranking(count: usize) -> Vec<ScoredProfile> {
        (0..count)
            .map(|i| ScoredProfile {
                profile: MatchProfile::new(format!("user-{}", i)),
                score: 100u8.saturating_sub(i as u8),
                shared_languages: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_paginate_first_page() {
        let page = paginate(ranking(5), 0, 2);

        assert_eq!(page.total_results, 5);
        assert!(page.has_more);
        let ids: Vec<_> = page.recommendations.iter().map(|r| r.profile.user_id.as_str()).collect();
        assert_eq!(ids, vec!["user-0", "user-1"]);
    }

    #[test]
    fn test_paginate_exact_fit() {
        let page = paginate(ranking(4), 2, 2);

        assert_eq!(page.recommendations.len(), 2);
        assert_eq!(page.recommendations[0].profile.user_id, "user-2");
        assert!(!page.has_more);
    }

    #[test]
    fn test_paginate_offset_past_end() {
        let page = paginate(ranking(3), 10, 5);

        assert!(page.recommendations.is_empty());
        assert_eq!(page.total_results, 3);
        assert!(!page.has_more);
    }

    #[test]
    fn test_paginate_with_default_limit() {
        let limits = PageLimits { default_limit: 5, max_limit: 100 };
        let page = paginate(ranking(8), 0, limits.resolve(0));

        assert_eq!(page.recommendations.len(), 5);
        assert!(page.has_more);
    }

    #[test]
    fn test_paginate_response_shape() {
        let json = serde_json::to_value(paginate(ranking(1), 0, 20)).unwrap();

        assert_eq!(json["totalResults"], 1);
        assert_eq!(json["hasMore"], false);
        assert_eq!(json["recommendations"][0]["profile"]["userId"], "user-0");
    }
}
