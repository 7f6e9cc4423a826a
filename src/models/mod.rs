// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateFilter, Level, Match, MatchProfile, MatchStatus, Preferences, ScoredProfile,
    ScoringWeights, ANY_LEVEL,
};
pub use requests::{CreateMatchRequest, RecommendationsRequest, RespondMatchRequest, UserQuery};
pub use responses::{DeletedResponse, ErrorResponse, HealthResponse, MatchesResponse, RecommendationsResponse};
