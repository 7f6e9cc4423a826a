use crate::models::{CandidateFilter, Match, MatchProfile, ScoredProfile, ScoringWeights};
use crate::core::{
    filters::{is_eligible, matches_filter},
    lifecycle::MatchError,
    scoring::calculate_match_score,
};

/// Result of the recommendation process
#[derive(Debug)]
pub struct RecommendationResult {
    pub recommendations: Vec<ScoredProfile>,
    pub total_candidates: usize,
}

/// Recommendation assembler - filters, scores and ranks candidates
///
/// # Pipeline Stages
/// 1. Eligibility (not self, active, not already matched)
/// 2. Optional hard filters (level, location, free text)
/// 3. Scoring
/// 4. Stable descending sort
///
/// Stateless: every call works on the snapshot passed in.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Score `candidate` for `subject` with this recommender's weights
    pub fn score(&self, subject: &MatchProfile, candidate: &MatchProfile) -> u8 {
        super::scoring::compute_weighted_score(subject, candidate, &self.weights)
    }

    /// Rank every eligible candidate for `subject`
    ///
    /// Candidates with equal scores keep their input order.
    pub fn recommend(
        &self,
        subject: &MatchProfile,
        candidates: Vec<MatchProfile>,
        existing_matches: &[Match],
    ) -> RecommendationResult {
        self.recommend_filtered(subject, candidates, existing_matches, &CandidateFilter::default())
    }

    /// [`Recommender::recommend`] narrowed by caller-supplied hard filters
    pub fn recommend_filtered(
        &self,
        subject: &MatchProfile,
        candidates: Vec<MatchProfile>,
        existing_matches: &[Match],
        filter: &CandidateFilter,
    ) -> RecommendationResult {
        let total_candidates = candidates.len();

        let mut recommendations: Vec<ScoredProfile> = candidates
            .into_iter()
            // Stage 1: eligibility
            .filter(|profile| is_eligible(subject, profile, existing_matches))
            // Stage 2: hard filters
            .filter(|profile| matches_filter(subject, profile, filter))
            // Stage 3: scoring
            .map(|profile| {
                let (score, shared_languages) =
                    calculate_match_score(subject, &profile, &self.weights);
                ScoredProfile {
                    profile,
                    score,
                    shared_languages,
                }
            })
            .collect();

        // Stage 4: sort_by is stable, ties keep input order
        recommendations.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(
            "Recommended {} of {} candidates for {}",
            recommendations.len(),
            total_candidates,
            subject.user_id
        );

        RecommendationResult {
            recommendations,
            total_candidates,
        }
    }

    /// Locate `subject_id` in `all_profiles` and recommend from the rest
    pub fn recommend_for(
        &self,
        subject_id: &str,
        all_profiles: Vec<MatchProfile>,
        existing_matches: &[Match],
    ) -> Result<RecommendationResult, MatchError> {
        let subject = all_profiles
            .iter()
            .find(|p| p.user_id == subject_id)
            .cloned()
            .ok_or_else(|| MatchError::ProfileNotFound(subject_id.to_string()))?;

        Ok(self.recommend(&subject, all_profiles, existing_matches))
    }
}
