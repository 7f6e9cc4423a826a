//! Devmatch - coding-partner matching service for the Q&A forum
//!
//! This library provides the compatibility scorer and recommendation
//! pipeline behind the "find a coding partner" feature, plus the HTTP
//! handlers and storage clients that serve it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compute_score, MatchError, RecommendationResult, Recommender};
pub use crate::models::{CandidateFilter, Level, Match, MatchProfile, MatchStatus, Preferences, ScoredProfile, ScoringWeights};
