// Core algorithm exports
pub mod filters;
pub mod lifecycle;
pub mod recommender;
pub mod scoring;

pub use filters::{exclude_linked, is_already_matched, is_eligible, matches_filter};
pub use lifecycle::{ensure_can_remove, open_match, respond, MatchError};
pub use recommender::{RecommendationResult, Recommender};
pub use scoring::{calculate_match_score, compute_score, compute_weighted_score, language_overlap, preference_overlap};
