use std::str::FromStr;

use crate::error::AppError;

/// Review state of a homework as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Reviewing,
    Approved,
    Rejected,
}

impl HomeworkStatus {
    /// Fixed verdict phrase shown to the student.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "approved" => Ok(HomeworkStatus::Approved),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(AppError::UnknownStatus(other.to_string())),
        }
    }
}

/// One homework entry from the `homeworks` list.
///
/// Both fields stay optional: a record missing a key is still handed to
/// [`parse_status`](super::status::parse_status), which rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRecord {
    pub name: Option<String>,
    pub status: Option<String>,
}

/// Decoded body of a successful API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub payload: serde_json::Value,
    /// Forward cursor for the next request, if the API supplied one.
    pub current_date: Option<i64>,
}

impl ApiResponse {
    pub fn new(payload: serde_json::Value) -> Self {
        let current_date = payload.get("current_date").and_then(|v| v.as_i64());
        Self {
            payload,
            current_date,
        }
    }
}
