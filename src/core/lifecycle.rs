use thiserror::Error;
use crate::models::{Match, MatchProfile, MatchStatus};

/// Rule violations in the match lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Profile is inactive: {0}")]
    InactiveProfile(String),

    #[error("Users cannot match with themselves")]
    SelfMatch,

    #[error("A match between {0} and {1} already exists")]
    AlreadyMatched(String, String),

    #[error("Only {0} can respond to this match")]
    NotRecipient(String),

    #[error("User {0} is not part of this match")]
    NotParticipant(String),

    #[error("Cannot move a {from} match to {to}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },
}

/// Build a new pending match from `initiator` to `recipient`
///
/// `score` is the snapshot stored with the record; callers pass the
/// compatibility of the recipient from the initiator's point of view.
pub fn open_match(
    initiator: &MatchProfile,
    recipient: &MatchProfile,
    existing_matches: &[Match],
    score: u8,
) -> Result<Match, MatchError> {
    if initiator.user_id == recipient.user_id {
        return Err(MatchError::SelfMatch);
    }

    if !recipient.is_active {
        return Err(MatchError::InactiveProfile(recipient.user_id.clone()));
    }

    if super::filters::is_already_matched(&initiator.user_id, &recipient.user_id, existing_matches) {
        return Err(MatchError::AlreadyMatched(
            initiator.user_id.clone(),
            recipient.user_id.clone(),
        ));
    }

    let now = chrono::Utc::now();

    Ok(Match {
        id: uuid::Uuid::new_v4(),
        user_a: initiator.user_id.clone(),
        user_b: recipient.user_id.clone(),
        status: MatchStatus::Pending,
        score,
        initiated_by: initiator.user_id.clone(),
        created_at: now,
        updated_at: now,
    })
}

/// Apply the recipient's answer to a pending match
pub fn respond(record: &mut Match, responder: &str, status: MatchStatus) -> Result<(), MatchError> {
    if record.user_b != responder {
        return Err(MatchError::NotRecipient(record.user_b.clone()));
    }

    if record.status != MatchStatus::Pending || status == MatchStatus::Pending {
        return Err(MatchError::InvalidTransition {
            from: record.status,
            to: status,
        });
    }

    record.status = status;
    record.updated_at = chrono::Utc::now();
    Ok(())
}

/// Either participant may delete a match
pub fn ensure_can_remove(record: &Match, user_id: &str) -> Result<(), MatchError> {
    if record.involves(user_id) {
        Ok(())
    } else {
        Err(MatchError::NotParticipant(user_id.to_string()))
    }
}
