//! Type definitions for Account Sentry
//! Core data structures shared by the checklist, the lookup client and both front ends

use serde::{Deserialize, Serialize};

use super::errors::{AppError, ErrorCode};

/// One weighted checklist item: a possible sign of account compromise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    /// Stable identifier, unique within a checklist
    pub id: String,
    /// Weight added to the score when checked (0-100)
    pub points: u8,
    pub title: String,
    pub description: String,
}

impl Indicator {
    pub fn new(
        id: impl Into<String>,
        points: u8,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            points,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Risk level classification for a checklist score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Below the Medium threshold
    Low,
    /// Some strong signs, act soon
    Medium,
    /// Likely compromised, act now
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Low => "✅",
            RiskLevel::Medium => "🟠",
            RiskLevel::High => "🔴",
        }
    }

    /// Display class used to style this level
    pub fn tone(&self) -> Tone {
        match self {
            RiskLevel::Low => Tone::Ok,
            RiskLevel::Medium => Tone::Warn,
            RiskLevel::High => Tone::Bad,
        }
    }
}

/// Styling of a note or pill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Ok,
    Warn,
    Bad,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Ok => "ok",
            Tone::Warn => "warn",
            Tone::Bad => "bad",
        }
    }
}

/// Outcome of a username lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    /// First record returned by the endpoint, untouched
    Success { record: serde_json::Value },
    /// Anything else, with the text to show the user
    Failure { code: ErrorCode, message: String },
}

impl LookupResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupResult::Success { .. })
    }

    pub fn record(&self) -> Option<&serde_json::Value> {
        match self {
            LookupResult::Success { record } => Some(record),
            LookupResult::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LookupResult::Success { .. } => None,
            LookupResult::Failure { message, .. } => Some(message),
        }
    }
}

impl From<AppError> for LookupResult {
    fn from(err: AppError) -> Self {
        LookupResult::Failure {
            code: err.code,
            message: err.message,
        }
    }
}
