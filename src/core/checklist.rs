//! Indicator Catalog
//!
//! The immutable list of compromise indicators. Built once at start-up and
//! handed to whatever renders or scores it; nothing mutates it afterwards.

use std::collections::HashSet;

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::Indicator;
use crate::utils::constants::MAX_SCORE;

/// Validated, ordered set of indicators
#[derive(Debug, Clone)]
pub struct Checklist {
    indicators: Vec<Indicator>,
}

impl Checklist {
    /// Build a checklist, rejecting duplicate ids and weights above 100
    pub fn new(indicators: Vec<Indicator>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for indicator in &indicators {
            if !seen.insert(indicator.id.as_str()) {
                return Err(AppError::new(
                    ErrorCode::ChecklistDuplicateId,
                    format!("Duplicate indicator id: {}", indicator.id),
                ));
            }
            if indicator.points > MAX_SCORE {
                return Err(AppError::new(
                    ErrorCode::ChecklistInvalidPoints,
                    format!(
                        "Indicator {} has {} points (max {})",
                        indicator.id, indicator.points, MAX_SCORE
                    ),
                ));
            }
        }
        Ok(Self { indicators })
    }

    /// The nine built-in account compromise indicators
    pub fn builtin() -> AppResult<Self> {
        Self::new(vec![
            Indicator::new(
                "email_changed",
                30,
                "Your account email was changed and you didn’t do it",
                "Strong sign of compromise. If you can still log in, change passwords immediately.",
            ),
            Indicator::new(
                "password_changed",
                30,
                "Your password was changed and you didn’t do it",
                "Strong sign. If you can’t log in, go to Roblox Support.",
            ),
            Indicator::new(
                "unknown_logins",
                25,
                "You see logins/sessions you don’t recognize",
                "If possible, log out of all sessions from the Security tab.",
            ),
            Indicator::new(
                "robux_spent",
                20,
                "Robux/items were spent/traded without you",
                "Check transactions and trades. Secure the account and contact support if needed.",
            ),
            Indicator::new(
                "new_friends",
                10,
                "New friends/following you didn’t add",
                "Sometimes attackers add accounts for later scams.",
            ),
            Indicator::new(
                "messages_sent",
                15,
                "Messages were sent that you didn’t send",
                "Common after token/cookie theft or password reuse.",
            ),
            Indicator::new(
                "extensions",
                10,
                "You installed random Roblox browser extensions / “FPS unlockers”",
                "Many are malicious. Remove suspicious extensions and run a malware scan.",
            ),
            Indicator::new(
                "same_password",
                10,
                "You reuse the same password on other sites",
                "Credential stuffing is very common.",
            ),
            Indicator::new(
                "no_2sv",
                10,
                "You don’t have 2-Step Verification enabled",
                "2SV greatly reduces takeover risk. Enable it and generate backup codes.",
            ),
        ])
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.id == id)
    }

    /// Sum of every weight, before clamping
    pub fn total_points(&self) -> u32 {
        self.indicators.iter().map(|i| i.points as u32).sum()
    }
}
