//! Account Sentry Library
//!
//! Self-check for signs that a Roblox account has been compromised:
//! - Weighted indicator checklist with a 0-100 heuristic risk score
//! - Low / Medium / High levels with tailored next steps
//! - Public username lookup via the Roblox users API (direct or proxied)

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod ui;
pub mod utils;

pub use crate::core::{
    Checklist, ChecklistForm, LookupPhase, Note, RiskScore, RiskScoreBuilder, Session,
    ToggleControl,
};
pub use models::{
    AppConfig, AppError, AppResult, ErrorCode, Indicator, LookupResult, RiskLevel, Tone,
};
pub use providers::RobloxUsersClient;
