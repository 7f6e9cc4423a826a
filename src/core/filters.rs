use crate::models::{CandidateFilter, Match, MatchProfile, ScoredProfile};

/// Check whether a profile may appear in `subject`'s recommendations at all
///
/// Drops the subject itself, inactive profiles and anyone already linked to
/// the subject by a match of any status.
#[inline]
pub fn is_eligible(
    subject: &MatchProfile,
    candidate: &MatchProfile,
    existing_matches: &[Match],
) -> bool {
    if candidate.user_id == subject.user_id {
        return false;
    }

    if !candidate.is_active {
        return false;
    }

    !is_already_matched(&subject.user_id, &candidate.user_id, existing_matches)
}

/// True if any match links the two users, in either position
#[inline]
pub fn is_already_matched(subject_id: &str, candidate_id: &str, existing_matches: &[Match]) -> bool {
    existing_matches.iter().any(|m| {
        (m.user_a == subject_id && m.user_b == candidate_id)
            || (m.user_b == subject_id && m.user_a == candidate_id)
    })
}

/// Drop entries of an already ranked list that `existing_matches` now link to `subject_id`
///
/// Ranked lists can outlive the match snapshot they were computed from, so
/// they are re-checked against the current matches before being served.
pub fn exclude_linked(
    subject_id: &str,
    mut ranked: Vec<ScoredProfile>,
    existing_matches: &[Match],
) -> Vec<ScoredProfile> {
    ranked.retain(|entry| !is_already_matched(subject_id, &entry.profile.user_id, existing_matches));
    ranked
}

/// Check a candidate against the caller's optional hard filters
///
/// These narrow the candidate list; they never feed into the score.
#[inline]
pub fn matches_filter(
    subject: &MatchProfile,
    candidate: &MatchProfile,
    filter: &CandidateFilter,
) -> bool {
    if let Some(level) = filter.level {
        if candidate.level != level {
            return false;
        }
    }

    if filter.honor_preferred_level {
        if let Some(preferred) = subject.preferences.preferred_level {
            if candidate.level != preferred {
                return false;
            }
        }
    }

    if let Some(location) = non_blank(filter.location.as_deref()) {
        if !contains_ignore_case(&candidate.location, location) {
            return false;
        }
    }

    if let Some(search) = non_blank(filter.search.as_deref()) {
        if !contains_ignore_case(&candidate.biography, search)
            && !contains_ignore_case(&candidate.location, search)
        {
            return false;
        }
    }

    true
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, MatchStatus};

    fn create_test_profile(id: &str, level: Level, location: &str, bio: &str) -> MatchProfile {
        let mut profile = MatchProfile::new(id);
        profile.level = level;
        profile.location = location.to_string();
        profile.biography = bio.to_string();
        profile.programming_language = vec!["Rust".to_string()];
        profile
    }

    fn create_match(a: &str, b: &str, status: MatchStatus) -> Match {
        let now = chrono::Utc::now();
        Match {
            id: uuid::Uuid::new_v4(),
            user_a: a.to_string(),
            user_b: b.to_string(),
            status,
            score: 0,
            initiated_by: a.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_exclude_linked_drops_stale_entries() {
        let ranked: Vec<ScoredProfile> = ["partner", "stranger", "ex"]
            .iter()
            .map(|id| ScoredProfile {
                profile: create_test_profile(id, Level::Beginner, "", ""),
                score: 20,
                shared_languages: vec!["Rust".to_string()],
            })
            .collect();
        let matches = vec![
            create_match("me", "partner", MatchStatus::Pending),
            create_match("ex", "me", MatchStatus::Rejected),
            create_match("stranger", "someone-else", MatchStatus::Accepted),
        ];

        let kept = exclude_linked("me", ranked, &matches);
        let ids: Vec<_> = kept.iter().map(|r| r.profile.user_id.as_str()).collect();

        assert_eq!(ids, vec!["stranger"]);
    }

    #[test]
    fn test_self_not_eligible() {
        let subject = create_test_profile("me", Level::Beginner, "", "");

        assert!(!is_eligible(&subject, &subject.clone(), &[]));
    }

    #[test]
    fn test_inactive_not_eligible() {
        let subject = create_test_profile("me", Level::Beginner, "", "");
        let mut other = create_test_profile("other", Level::Beginner, "", "");
        other.is_active = false;

        assert!(!is_eligible(&subject, &other, &[]));
    }

    #[test]
    fn test_matched_in_either_position_not_eligible() {
        let subject = create_test_profile("me", Level::Beginner, "", "");
        let other = create_test_profile("other", Level::Beginner, "", "");

        let outgoing = [create_match("me", "other", MatchStatus::Pending)];
        let incoming = [create_match("other", "me", MatchStatus::Rejected)];
        let unrelated = [create_match("other", "third", MatchStatus::Accepted)];

        assert!(!is_eligible(&subject, &other, &outgoing));
        assert!(!is_eligible(&subject, &other, &incoming));
        assert!(is_eligible(&subject, &other, &unrelated));
    }

    #[test]
    fn test_level_filter() {
        let subject = create_test_profile("me", Level::Beginner, "", "");
        let other = create_test_profile("other", Level::Advanced, "", "");
        let filter = CandidateFilter { level: Some(Level::Beginner), ..Default::default() };

        assert!(!matches_filter(&subject, &other, &filter));
        assert!(matches_filter(&subject, &other, &CandidateFilter::default()));
    }

    #[test]
    fn test_preferred_level_only_when_requested() {
        let mut subject = create_test_profile("me", Level::Beginner, "", "");
        subject.preferences.preferred_level = Some(Level::Intermediate);
        let other = create_test_profile("other", Level::Advanced, "", "");

        let honor = CandidateFilter { honor_preferred_level: true, ..Default::default() };

        assert!(!matches_filter(&subject, &other, &honor));
        assert!(matches_filter(&subject, &other, &CandidateFilter::default()));
    }

    #[test]
    fn test_location_and_search_case_insensitive() {
        let subject = create_test_profile("me", Level::Beginner, "", "");
        let other = create_test_profile("other", Level::Beginner, "Boston, MA", "Loves compilers");

        let by_location = CandidateFilter { location: Some("boston".into()), ..Default::default() };
        let by_bio = CandidateFilter { search: Some("COMPILERS".into()), ..Default::default() };
        let by_place = CandidateFilter { search: Some("ma".into()), ..Default::default() };
        let miss = CandidateFilter { search: Some("gardening".into()), ..Default::default() };
        let blank = CandidateFilter { location: Some("   ".into()), ..Default::default() };

        assert!(matches_filter(&subject, &other, &by_location));
        assert!(matches_filter(&subject, &other, &by_bio));
        assert!(matches_filter(&subject, &other, &by_place));
        assert!(!matches_filter(&subject, &other, &miss));
        assert!(matches_filter(&subject, &other, &blank));
    }
}
