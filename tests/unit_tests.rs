// Unit tests for the devmatch scoring core

use devmatch::core::{
    filters::{is_already_matched, matches_filter},
    scoring::{compute_score, language_overlap, preference_overlap},
};
use devmatch::models::{CandidateFilter, Level, Match, MatchProfile, MatchStatus};

fn profile(id: &str, languages: &[&str], preferred: &[&str]) -> MatchProfile {
    let mut p = MatchProfile::new(id);
    p.programming_language = languages.iter().map(|s| s.to_string()).collect();
    p.preferences.preferred_languages = preferred.iter().map(|s| s.to_string()).collect();
    p
}

#[test]
fn test_worked_example_partial_overlap() {
    let a = profile("a", &["JS", "Python"], &["Go"]);
    let b = profile("b", &["JS", "Go"], &[]);

    assert_eq!(compute_score(&a, &b), 35);
}

#[test]
fn test_worked_example_empty_candidate() {
    let a = profile("a", &["JS", "Python"], &["Go"]);
    let b = profile("b", &[], &[]);

    assert_eq!(compute_score(&a, &b), 0);
}

#[test]
fn test_worked_example_clamped() {
    let a = profile("a", &["JS", "Python", "Go"], &["JS", "Python", "Go", "Rust"]);
    let b = profile("b", &["JS", "Python", "Go", "Rust"], &[]);

    assert_eq!(language_overlap(&a, &b), 3);
    assert_eq!(preference_overlap(&a, &b), 4);
    assert_eq!(compute_score(&a, &b), 100);
}

#[test]
fn test_self_comparison() {
    // preference overlap also compares against itself
    let a = profile("a", &["JS", "Python"], &[]);
    assert_eq!(compute_score(&a, &a), 40);

    let b = profile("b", &["JS", "Python"], &["Python"]);
    assert_eq!(compute_score(&b, &b), 55);
}

#[test]
fn test_disjoint_profiles_score_zero() {
    let a = profile("a", &["JS"], &["Haskell"]);
    let b = profile("b", &["Rust", "C"], &["JS"]);

    assert_eq!(compute_score(&a, &b), 0);
}

#[test]
fn test_shared_language_adds_exactly_20() {
    let a = profile("a", &["JS", "Python", "Go"], &[]);
    let mut b = profile("b", &["JS"], &[]);

    let before = compute_score(&a, &b);
    b.programming_language.push("Python".to_string());
    let after = compute_score(&a, &b);

    assert_eq!(after, before + 20);
}

#[test]
fn test_score_in_range_for_many_languages() {
    let languages: Vec<String> = (0..50).map(|i| format!("lang{}", i)).collect();
    let mut a = MatchProfile::new("a");
    a.programming_language = languages.clone();
    a.preferences.preferred_languages = languages.clone();
    let mut b = MatchProfile::new("b");
    b.programming_language = languages;

    assert_eq!(compute_score(&a, &b), 100);
}

#[test]
fn test_missing_arrays_treated_as_empty() {
    let a: MatchProfile = serde_json::from_str(r#"{"userId": "a", "preferences": {}}"#).unwrap();
    let b: MatchProfile =
        serde_json::from_str(r#"{"userId": "b", "programmingLanguage": ["JS"]}"#).unwrap();

    assert_eq!(compute_score(&a, &b), 0);
    assert_eq!(compute_score(&b, &a), 0);
}

#[test]
fn test_already_matched_regardless_of_status() {
    let now = chrono::Utc::now();
    for status in [MatchStatus::Pending, MatchStatus::Accepted, MatchStatus::Rejected] {
        let m = Match {
            id: uuid::Uuid::new_v4(),
            user_a: "other".to_string(),
            user_b: "me".to_string(),
            status,
            score: 10,
            initiated_by: "other".to_string(),
            created_at: now,
            updated_at: now,
        };

        assert!(is_already_matched("me", "other", &[m]));
    }
}

#[test]
fn test_level_is_a_filter_not_a_score() {
    let mut a = profile("a", &["JS"], &[]);
    a.preferences.preferred_level = Some(Level::Advanced);

    let mut beginner = profile("b", &["JS"], &[]);
    beginner.level = Level::Beginner;
    let mut advanced = profile("c", &["JS"], &[]);
    advanced.level = Level::Advanced;

    assert_eq!(compute_score(&a, &beginner), compute_score(&a, &advanced));

    let filter = CandidateFilter { honor_preferred_level: true, ..Default::default() };
    assert!(!matches_filter(&a, &beginner, &filter));
    assert!(matches_filter(&a, &advanced, &filter));
}
