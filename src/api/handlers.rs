//! API Request Handlers

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::types::*;
use crate::core::checklist::Checklist;
use crate::core::session::ChecklistForm;
use crate::models::errors::AppError;
use crate::providers::roblox::RobloxUsersClient;
use crate::utils::constants::{MAX_SCORE, MSG_LOOKUP_FOUND};

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<()>>)>;

/// Shared application state
pub struct AppState {
    pub checklist: Checklist,
    pub users: RobloxUsersClient,
    pub stats: ApiStats,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(checklist: Checklist, users: RobloxUsersClient) -> Self {
        Self {
            checklist,
            users,
            stats: ApiStats::default(),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Request counters, in memory only
#[derive(Debug, Default)]
pub struct ApiStats {
    pub scores_computed: AtomicU64,
    pub lookups_found: AtomicU64,
    pub lookups_failed: AtomicU64,
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn error_response(err: &AppError, start: Instant) -> (StatusCode, Json<ApiResponse<()>>) {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ApiResponse::error(ApiError::from(err), elapsed_ms(start))),
    )
}

/// Malformed or missing JSON body, answered in the usual envelope
fn rejection_response(
    rejection: JsonRejection,
    start: Instant,
) -> (StatusCode, Json<ApiResponse<()>>) {
    let detail = rejection.body_text();
    warn!(status = rejection.status().as_u16(), "Rejected request body: {}", detail);

    let mut error = ApiError::from(&AppError::bad_request("Invalid JSON request body"));
    error.details = Some(detail);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(error, elapsed_ms(start))),
    )
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Checklist
// ============================================

pub async fn get_checklist(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ChecklistData>> {
    let start = Instant::now();
    let form = ChecklistForm::new(state.checklist.clone());

    let data = ChecklistData {
        indicators: form.controls().to_vec(),
        max_score: MAX_SCORE,
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Scoring
// ============================================

pub async fn score_checklist(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> ApiResult<ScoreData> {
    let start = Instant::now();
    let Json(req) = payload.map_err(|e| rejection_response(e, start))?;

    let mut form = ChecklistForm::new(state.checklist.clone());
    for id in &req.checked {
        form.set_checked(id, true)
            .map_err(|e| error_response(&e, start))?;
    }

    let score = form.score();
    state.stats.scores_computed.fetch_add(1, Ordering::Relaxed);
    info!(
        score = score.score,
        level = score.level.as_str(),
        checked = req.checked.len(),
        "📊 Checklist scored"
    );

    Ok(Json(ApiResponse::success(score.into(), elapsed_ms(start))))
}

// ============================================
// Username Lookup (server-side proxy)
// ============================================

pub async fn lookup_username(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LookupRequest>, JsonRejection>,
) -> ApiResult<LookupData> {
    let start = Instant::now();
    let Json(req) = payload.map_err(|e| rejection_response(e, start))?;

    match state.users.fetch_user(&req.username).await {
        Ok(user) => {
            state.stats.lookups_found.fetch_add(1, Ordering::Relaxed);
            let data = LookupData {
                username: req.username.trim().to_string(),
                user,
                note: MSG_LOOKUP_FOUND.to_string(),
            };
            Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
        }
        Err(e) => {
            if !e.code.is_validation() {
                state.stats.lookups_failed.fetch_add(1, Ordering::Relaxed);
            }
            warn!(code = e.code_str(), "Lookup failed: {}", e.message);
            Err(error_response(&e, start))
        }
    }
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();

    let data = StatsData {
        scores_computed: state.stats.scores_computed.load(Ordering::Relaxed),
        lookups_found: state.stats.lookups_found.load(Ordering::Relaxed),
        lookups_failed: state.stats.lookups_failed.load(Ordering::Relaxed),
        uptime_seconds: state.uptime_seconds(),
        api_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}
