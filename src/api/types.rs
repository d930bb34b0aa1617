//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::core::risk_score::RiskScore;
use crate::core::session::ToggleControl;
use crate::models::errors::AppError;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: None,
        }
    }
}

// ============================================
// Checklist
// ============================================

#[derive(Debug, Serialize)]
pub struct ChecklistData {
    pub indicators: Vec<ToggleControl>,
    pub max_score: u8,
}

// ============================================
// Scoring
// ============================================

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    /// Ids of the checked indicators
    #[serde(default)]
    pub checked: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreData {
    pub score: u8,
    pub level: String,
    pub tone: String,
    pub matched: Vec<MatchedIndicator>,
    pub advice: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchedIndicator {
    pub id: String,
    pub title: String,
    pub points: u8,
}

impl From<RiskScore> for ScoreData {
    fn from(score: RiskScore) -> Self {
        Self {
            score: score.score,
            level: score.level.as_str().to_string(),
            tone: score.tone().as_str().to_string(),
            matched: score
                .matched
                .into_iter()
                .map(|i| MatchedIndicator {
                    id: i.id,
                    title: i.title,
                    points: i.points,
                })
                .collect(),
            advice: score.advice,
        }
    }
}

// ============================================
// Lookup
// ============================================

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LookupData {
    pub username: String,
    /// Record exactly as returned upstream
    pub user: serde_json::Value,
    pub note: String,
}

// ============================================
// Stats
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub scores_computed: u64,
    pub lookups_found: u64,
    pub lookups_failed: u64,
    pub uptime_seconds: u64,
    pub api_version: String,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
