//! Risk Scoring Module
//! Turns a set of checked indicators into a 0-100 score, a level and advice
//!
//! - 0-34: Low
//! - 35-69: Medium
//! - 70-100: High
//!
//! The score is a heuristic, not proof of compromise.

use serde::{Deserialize, Serialize};

use crate::models::types::{Indicator, RiskLevel, Tone};
use crate::utils::constants::{
    BASE_ADVICE, HIGH_ADVICE, HIGH_THRESHOLD, MAX_SCORE, MEDIUM_ADVICE, MEDIUM_THRESHOLD,
};

/// Result of scoring a checklist selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Clamped score (0-100)
    pub score: u8,
    pub level: RiskLevel,
    /// Checked indicators, in catalog order
    pub matched: Vec<Indicator>,
    /// Next steps, most urgent first
    pub advice: Vec<String>,
}

impl RiskScore {
    /// Score the given checked indicators
    pub fn calculate(matched: Vec<Indicator>) -> Self {
        let raw: u32 = matched.iter().map(|i| i.points as u32).sum();
        let score = raw.min(MAX_SCORE as u32) as u8;
        let level = Self::level_for(score);

        Self {
            score,
            level,
            matched,
            advice: Self::advice_for(level),
        }
    }

    /// Map a clamped score to its level
    pub fn level_for(score: u8) -> RiskLevel {
        match score {
            s if s >= HIGH_THRESHOLD => RiskLevel::High,
            s if s >= MEDIUM_THRESHOLD => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    /// Advice for a level. Medium and High each prepend their own steps
    /// to the base list; High does not include the Medium step.
    pub fn advice_for(level: RiskLevel) -> Vec<String> {
        let extra: &[&str] = match level {
            RiskLevel::Low => &[],
            RiskLevel::Medium => &[MEDIUM_ADVICE],
            RiskLevel::High => &HIGH_ADVICE,
        };

        extra
            .iter()
            .chain(BASE_ADVICE.iter())
            .map(|s| s.to_string())
            .collect()
    }

    /// Styling class for the level pill
    pub fn tone(&self) -> Tone {
        self.level.tone()
    }

    /// Titles of the indicators that contributed to the score
    pub fn matched_titles(&self) -> Vec<&str> {
        self.matched.iter().map(|i| i.title.as_str()).collect()
    }
}

/// Builder for creating risk scores one indicator at a time
pub struct RiskScoreBuilder {
    matched: Vec<Indicator>,
}

impl RiskScoreBuilder {
    pub fn new() -> Self {
        Self {
            matched: Vec::new(),
        }
    }

    /// Add a checked indicator
    pub fn with_indicator(mut self, indicator: &Indicator) -> Self {
        self.matched.push(indicator.clone());
        self
    }

    /// Build final risk score
    pub fn build(self) -> RiskScore {
        RiskScore::calculate(self.matched)
    }
}

impl Default for RiskScoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
