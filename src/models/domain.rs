use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Self-reported experience level of a profile owner
///
/// Serialized upper-case; parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "BEGINNER",
            Level::Intermediate => "INTERMEDIATE",
            Level::Advanced => "ADVANCED",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BEGINNER" => Ok(Level::Beginner),
            "INTERMEDIATE" => Ok(Level::Intermediate),
            "ADVANCED" => Ok(Level::Advanced),
            other => Err(format!("unknown level: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Partner preferences attached to a profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "preferredLanguages", default, deserialize_with = "null_as_default")]
    pub preferred_languages: Vec<String>,
    /// `None` is the "ANY" sentinel: no level preference
    #[serde(
        rename = "preferredLevel",
        default,
        deserialize_with = "deserialize_preferred_level",
        serialize_with = "serialize_preferred_level"
    )]
    pub preferred_level: Option<Level>,
}

fn deserialize_preferred_level<'de, D>(deserializer: D) -> Result<Option<Level>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("any") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn serialize_preferred_level<S>(level: &Option<Level>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match level {
        Some(level) => serializer.serialize_str(level.as_str()),
        None => serializer.serialize_str(ANY_LEVEL),
    }
}

/// Explicit `null` behaves like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wire value for "no level preference"
pub const ANY_LEVEL: &str = "ANY";

/// A user's coding-partner profile
///
/// Every collection field defaults to empty so partially filled documents
/// still deserialize and score as zero overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "programmingLanguage", default, deserialize_with = "null_as_default")]
    pub programming_language: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: Level,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferences: Preferences,
    #[serde(default, deserialize_with = "null_as_default")]
    pub biography: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl MatchProfile {
    /// Bare active profile with no languages or preferences
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_active: true,
            programming_language: Vec::new(),
            level: Level::default(),
            preferences: Preferences::default(),
            biography: String::new(),
            location: String::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

fn default_true() -> bool { true }

/// Lifecycle state of a match request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Accepted,
    Rejected,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(MatchStatus::Pending),
            "accepted" => Ok(MatchStatus::Accepted),
            "rejected" => Ok(MatchStatus::Rejected),
            other => Err(format!("unknown match status: {}", other)),
        }
    }
}

/// Relationship record between two users
///
/// `user_a` always initiated the request; `user_b` is the recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: uuid::Uuid,
    #[serde(rename = "userA")]
    pub user_a: String,
    #[serde(rename = "userB")]
    pub user_b: String,
    pub status: MatchStatus,
    pub score: u8,
    #[serde(rename = "initiatedBy")]
    pub initiated_by: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Match {
    /// True if `user_id` sits on either side of this match
    pub fn involves(&self, user_id: &str) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }
}

/// A recommended candidate with its compatibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProfile {
    pub profile: MatchProfile,
    pub score: u8,
    #[serde(rename = "sharedLanguages", default)]
    pub shared_languages: Vec<String>,
}

/// Optional hard filters applied before scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFilter {
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(rename = "honorPreferredLevel", default)]
    pub honor_preferred_level: bool,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    /// Points per language both users write
    pub language: u32,
    /// Points per candidate language the subject prefers
    pub preference: u32,
    /// Upper clamp on the total
    pub max_score: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            language: 20,
            preference: 15,
            max_score: 100,
        }
    }
}
