use std::collections::HashSet;
use crate::models::{MatchProfile, ScoringWeights};

/// Calculate a compatibility score (0-100) of `candidate` for `subject`
///
/// Scoring formula:
/// score = min(
///     language_overlap * 20 +      # languages both users write
///     preference_overlap * 15,     # candidate languages the subject wants
///     100
/// )
///
/// The function is asymmetric: only the subject's preferences are consulted,
/// so `compute_score(a, b)` and `compute_score(b, a)` can differ.
pub fn compute_score(subject: &MatchProfile, candidate: &MatchProfile) -> u8 {
    compute_weighted_score(subject, candidate, &ScoringWeights::default())
}

/// [`compute_score`] with explicit weights
pub fn compute_weighted_score(
    subject: &MatchProfile,
    candidate: &MatchProfile,
    weights: &ScoringWeights,
) -> u8 {
    let language = u32::try_from(language_overlap(subject, candidate)).unwrap_or(u32::MAX);
    let preference = u32::try_from(preference_overlap(subject, candidate)).unwrap_or(u32::MAX);

    let total = language
        .saturating_mul(weights.language)
        .saturating_add(preference.saturating_mul(weights.preference));

    total.min(u32::from(weights.max_score)) as u8
}

/// Score plus the languages both users write, in candidate order
pub fn calculate_match_score(
    subject: &MatchProfile,
    candidate: &MatchProfile,
    weights: &ScoringWeights,
) -> (u8, Vec<String>) {
    let score = compute_weighted_score(subject, candidate, weights);
    (score, shared_languages(subject, candidate))
}

/// Number of distinct languages present in both profiles
#[inline]
pub fn language_overlap(subject: &MatchProfile, candidate: &MatchProfile) -> usize {
    set_overlap(&subject.programming_language, &candidate.programming_language)
}

/// Number of distinct candidate languages listed in the subject's preferences
#[inline]
pub fn preference_overlap(subject: &MatchProfile, candidate: &MatchProfile) -> usize {
    set_overlap(
        &subject.preferences.preferred_languages,
        &candidate.programming_language,
    )
}

fn set_overlap(left: &[String], right: &[String]) -> usize {
    let left: HashSet<&str> = left.iter().map(String::as_str).collect();
    let right: HashSet<&str> = right.iter().map(String::as_str).collect();
    left.intersection(&right).count()
}

fn shared_languages(subject: &MatchProfile, candidate: &MatchProfile) -> Vec<String> {
    let known: HashSet<&str> = subject
        .programming_language
        .iter()
        .map(String::as_str)
        .collect();
    let mut seen = HashSet::new();

    candidate
        .programming_language
        .iter()
        .filter(|lang| known.contains(lang.as_str()) && seen.insert(lang.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, languages: &[&str], preferred: &[&str]) -> MatchProfile {
        let mut p = MatchProfile::new(id);
        p.programming_language = languages.iter().map(|s| s.to_string()).collect();
        p.preferences.preferred_languages = preferred.iter().map(|s| s.to_string()).collect();
        p
    }

    #[test]
    fn test_language_and_preference_overlap() {
        let a = profile("a", &["JS", "Python"], &["Go"]);
        let b = profile("b", &["JS", "Go"], &[]);

        assert_eq!(language_overlap(&a, &b), 1);
        assert_eq!(preference_overlap(&a, &b), 1);
        assert_eq!(compute_score(&a, &b), 35);
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        let a = profile("a", &["JS", "Python"], &["Go"]);
        let b = profile("b", &[], &[]);

        assert_eq!(compute_score(&a, &b), 0);
    }

    #[test]
    fn test_score_clamped_to_100() {
        let a = profile("a", &["JS", "Python", "Go"], &["JS", "Python", "Go", "Rust"]);
        let b = profile("b", &["JS", "Python", "Go", "Rust"], &[]);

        // 3 * 20 + 4 * 15 = 120
        assert_eq!(compute_score(&a, &b), 100);
    }

    #[test]
    fn test_asymmetric() {
        let a = profile("a", &["JS"], &["Go"]);
        let b = profile("b", &["JS", "Go"], &[]);

        assert_eq!(compute_score(&a, &b), 35);
        assert_eq!(compute_score(&b, &a), 20);
    }

    #[test]
    fn test_duplicates_ignored() {
        let a = profile("a", &["JS", "JS"], &["Go", "Go"]);
        let b = profile("b", &["JS", "Go", "Go", "JS"], &[]);

        assert_eq!(compute_score(&a, &b), 35);
    }

    #[test]
    fn test_language_names_are_case_sensitive() {
        let a = profile("a", &["rust"], &[]);
        let b = profile("b", &["Rust"], &[]);

        assert_eq!(compute_score(&a, &b), 0);
    }

    #[test]
    fn test_custom_weights() {
        let a = profile("a", &["JS"], &["JS"]);
        let b = profile("b", &["JS"], &[]);
        let weights = ScoringWeights { language: 10, preference: 5, max_score: 100 };

        assert_eq!(compute_weighted_score(&a, &b, &weights), 15);
    }

    #[test]
    fn test_shared_languages_in_candidate_order() {
        let a = profile("a", &["Python", "JS", "Go"], &[]);
        let b = profile("b", &["Go", "Rust", "JS", "Go"], &[]);

        let (score, shared) = calculate_match_score(&a, &b, &ScoringWeights::default());

        assert_eq!(score, 40);
        assert_eq!(shared, vec!["Go", "JS"]);
    }
}
