//! Request bodies and the few response fields the client interprets.

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::strategy::Move;

/// Qualification opponent difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl Difficulty {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => bail!("invalid difficulty '{}': must be one of easy, medium, hard", s),
        }
    }
}

/// Qualification state reported after each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualStatus {
    Passed,
    Failed,
    InProgress,
}

impl QualStatus {
    /// Read `qualStatus` from a round response. Anything other than
    /// PASSED/FAILED (including a missing field) means the match goes on.
    pub fn from_round(response: &Value) -> Self {
        match raw_qual_status(response).as_str() {
            "PASSED" => QualStatus::Passed,
            "FAILED" => QualStatus::Failed,
            _ => QualStatus::InProgress,
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, QualStatus::Passed | QualStatus::Failed)
    }
}

/// `qualStatus` of a round response, uppercased. A missing or non-string
/// field reads as IN_PROGRESS.
pub fn raw_qual_status(response: &Value) -> String {
    response
        .get("qualStatus")
        .and_then(Value::as_str)
        .unwrap_or("IN_PROGRESS")
        .to_uppercase()
}

/// Leaderboard kind for `GET /api/rankings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RankingType {
    #[default]
    Agents,
    Viewers,
}

impl fmt::Display for RankingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RankingType {
    pub fn as_str(self) -> &'static str {
        match self {
            RankingType::Agents => "agents",
            RankingType::Viewers => "viewers",
        }
    }
}

/// Leaderboard window for `GET /api/rankings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RankingPeriod {
    #[default]
    Weekly,
    Season,
}

impl fmt::Display for RankingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RankingPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            RankingPeriod::Weekly => "weekly",
            RankingPeriod::Season => "season",
        }
    }
}

/// Body of `POST /api/agents`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RegisterRequest {
    /// Empty optional strings are dropped rather than sent.
    pub fn new(name: &str, email: Option<&str>, description: Option<&str>) -> Self {
        let non_empty = |s: Option<&str>| s.filter(|v| !v.is_empty()).map(str::to_string);
        Self {
            name: name.to_string(),
            author_email: non_empty(email),
            description: non_empty(description),
        }
    }
}

/// Body of `POST /api/agents/me/qualify`.
#[derive(Debug, Clone, Serialize)]
pub struct QualifyStartRequest {
    pub difficulty: Difficulty,
}

/// Body of a qualification round submission.
#[derive(Debug, Clone, Serialize)]
pub struct RoundMoveRequest {
    #[serde(rename = "move")]
    pub mv: Move,
}

/// Body of `POST /api/matches/{id}/rounds/{n}/commit`.
#[derive(Debug, Clone, Serialize)]
pub struct CommitRequest {
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Move>,
}

/// Body of `POST /api/matches/{id}/rounds/{n}/reveal`.
#[derive(Debug, Clone, Serialize)]
pub struct RevealRequest {
    #[serde(rename = "move")]
    pub mv: Move,
    pub salt: String,
}

/// Non-empty string field of a JSON object, if present.
pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_request_omits_missing_fields() {
        let body = serde_json::to_value(RegisterRequest::new("MyBot-001", None, Some(""))).unwrap();
        assert_eq!(body, json!({"name": "MyBot-001"}));
    }

    #[test]
    fn register_request_uses_author_email_key() {
        let req = RegisterRequest::new("MyBot-001", Some("a@b.c"), Some("plays paper"));
        let body = serde_json::to_value(req).unwrap();
        assert_eq!(
            body,
            json!({"name": "MyBot-001", "authorEmail": "a@b.c", "description": "plays paper"})
        );
    }

    #[test]
    fn qualify_start_serializes_lowercase_difficulty() {
        let body = serde_json::to_value(QualifyStartRequest { difficulty: Difficulty::Hard }).unwrap();
        assert_eq!(body, json!({"difficulty": "hard"}));
    }

    #[test]
    fn round_move_uses_move_key() {
        let body = serde_json::to_value(RoundMoveRequest { mv: Move::Scissors }).unwrap();
        assert_eq!(body, json!({"move": "SCISSORS"}));
    }

    #[test]
    fn commit_request_skips_absent_prediction() {
        let body = serde_json::to_value(CommitRequest {
            hash: "ab".to_string(),
            prediction: None,
        })
        .unwrap();
        assert_eq!(body, json!({"hash": "ab"}));
    }

    #[test]
    fn qual_status_is_case_insensitive() {
        assert_eq!(QualStatus::from_round(&json!({"qualStatus": "passed"})), QualStatus::Passed);
        assert_eq!(QualStatus::from_round(&json!({"qualStatus": "FAILED"})), QualStatus::Failed);
    }

    #[test]
    fn qual_status_missing_or_unknown_is_in_progress() {
        assert_eq!(QualStatus::from_round(&json!({})), QualStatus::InProgress);
        assert_eq!(QualStatus::from_round(&json!({"qualStatus": "PENDING"})), QualStatus::InProgress);
        assert_eq!(QualStatus::from_round(&json!(["not", "an", "object"])), QualStatus::InProgress);
        assert!(!QualStatus::InProgress.is_final());
    }

    #[test]
    fn raw_qual_status_keeps_unknown_values() {
        assert_eq!(raw_qual_status(&json!({"qualStatus": "pending"})), "PENDING");
        assert_eq!(raw_qual_status(&json!({})), "IN_PROGRESS");
        assert_eq!(raw_qual_status(&json!({"qualStatus": 3})), "IN_PROGRESS");
    }

    #[test]
    fn qual_status_serializes_screaming_case() {
        assert_eq!(serde_json::to_value(QualStatus::InProgress).unwrap(), json!("IN_PROGRESS"));
    }

    #[test]
    fn difficulty_parse_rejects_unknown() {
        assert_eq!(Difficulty::parse("Medium").unwrap(), Difficulty::Medium);
        assert!(Difficulty::parse("insane").is_err());
    }

    #[test]
    fn str_field_ignores_empty_and_non_string() {
        let v = json!({"apiKey": "", "qualMatchId": 7, "name": "x"});
        assert_eq!(str_field(&v, "apiKey"), None);
        assert_eq!(str_field(&v, "qualMatchId"), None);
        assert_eq!(str_field(&v, "name"), Some("x"));
    }
}
