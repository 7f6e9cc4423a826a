use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{CandidateFilter, MatchStatus};

/// Request to list recommended partners
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// `0` or omitted means the configured default page size
    #[serde(default)]
    pub limit: u16,
    #[serde(default)]
    pub offset: usize,
    #[serde(flatten)]
    pub filter: CandidateFilter,
}

/// Request to open a match with another user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
}

/// Recipient's answer to a pending match
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RespondMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    pub status: MatchStatus,
}

/// Query string carrying the acting user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}
