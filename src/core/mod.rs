//! Core Module - Checklist Engine
//!
//! Indicator catalog, risk scoring and the per-session UI state.

pub mod checklist;
pub mod risk_score;
pub mod session;

pub use checklist::*;
pub use risk_score::*;
pub use session::*;
