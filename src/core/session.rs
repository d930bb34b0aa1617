//! Session State
//!
//! Everything the user can see during one run: the checklist form, the score
//! panel, the lookup note and the lookup output. Owned by the controller that
//! drives it; lookups report back through [`Session::finish_lookup`] so the
//! last one to resolve decides what is shown.

use serde::Serialize;
use tracing::debug;

use super::checklist::Checklist;
use super::risk_score::{RiskScore, RiskScoreBuilder};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{LookupResult, Tone};
use crate::utils::constants::{MSG_EMPTY_USERNAME, MSG_LOOKUP_FOUND, MSG_LOOKUP_PENDING};

/// One rendered checkbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleControl {
    pub id: String,
    pub points: u8,
    pub title: String,
    pub description: String,
    pub checked: bool,
}

/// The checklist as rendered: one control per indicator, in catalog order
#[derive(Debug, Clone)]
pub struct ChecklistForm {
    checklist: Checklist,
    controls: Vec<ToggleControl>,
}

impl ChecklistForm {
    pub fn new(checklist: Checklist) -> Self {
        let mut form = Self {
            checklist,
            controls: Vec::new(),
        };
        form.render();
        form
    }

    /// Clear the container and rebuild one unchecked control per indicator
    pub fn render(&mut self) -> &[ToggleControl] {
        self.controls.clear();
        self.controls.extend(self.checklist.indicators().iter().map(|i| ToggleControl {
            id: i.id.clone(),
            points: i.points,
            title: i.title.clone(),
            description: i.description.clone(),
            checked: false,
        }));
        &self.controls
    }

    pub fn controls(&self) -> &[ToggleControl] {
        &self.controls
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.controls.iter().any(|c| c.id == id && c.checked)
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) -> AppResult<()> {
        let control = self
            .controls
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::unknown_indicator(id))?;
        control.checked = checked;
        Ok(())
    }

    /// Flip one control, returning its new state
    pub fn toggle(&mut self, id: &str) -> AppResult<bool> {
        let checked = !self.is_checked(id);
        self.set_checked(id, checked)?;
        Ok(checked)
    }

    /// Sum the checked indicators into a score. Reads form state only.
    pub fn score(&self) -> RiskScore {
        self.checklist
            .indicators()
            .iter()
            .filter(|i| self.is_checked(&i.id))
            .fold(RiskScoreBuilder::new(), |builder, i| builder.with_indicator(i))
            .build()
    }

    /// Uncheck everything
    pub fn clear(&mut self) {
        for control in &mut self.controls {
            control.checked = false;
        }
    }
}

/// Inline message under the lookup box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub tone: Tone,
    pub text: String,
}

impl Note {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// Where the lookup widget is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    Idle,
    Pending,
    Success,
    Failure,
}

/// UI state for one session
#[derive(Debug, Clone)]
pub struct Session {
    pub form: ChecklistForm,
    /// Username input box
    pub username: String,
    result: Option<RiskScore>,
    note: Option<Note>,
    output: Option<serde_json::Value>,
    phase: LookupPhase,
    in_flight: usize,
}

impl Session {
    pub fn new(checklist: Checklist) -> Self {
        Self {
            form: ChecklistForm::new(checklist),
            username: String::new(),
            result: None,
            note: None,
            output: None,
            phase: LookupPhase::Idle,
            in_flight: 0,
        }
    }

    /// Score the form and show the result panel
    pub fn score(&mut self) -> &RiskScore {
        let score = self.form.score();
        debug!(score = score.score, level = score.level.as_str(), "Checklist scored");
        self.result.insert(score)
    }

    /// Uncheck everything, clear the username, hide result and lookup output
    pub fn reset(&mut self) {
        self.form.clear();
        self.username.clear();
        self.result = None;
        self.hide_lookup();
        self.phase = LookupPhase::Idle;
    }

    /// Start a lookup for the current username input.
    ///
    /// Returns the trimmed name to send, or `None` when the input is blank,
    /// in which case the validation note is already shown and nothing
    /// should be sent.
    pub fn begin_lookup(&mut self) -> Option<String> {
        let username = self.username.trim().to_string();
        self.hide_lookup();

        if username.is_empty() {
            self.note = Some(Note::new(Tone::Warn, MSG_EMPTY_USERNAME));
            self.phase = LookupPhase::Failure;
            return None;
        }

        self.note = Some(Note::new(Tone::Warn, MSG_LOOKUP_PENDING));
        self.phase = LookupPhase::Pending;
        self.in_flight += 1;
        Some(username)
    }

    /// Apply a resolved lookup. Whatever resolves last is what stays visible.
    pub fn finish_lookup(&mut self, result: LookupResult) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            LookupResult::Success { record } => {
                self.note = Some(Note::new(Tone::Ok, MSG_LOOKUP_FOUND));
                self.output = Some(record);
                self.phase = LookupPhase::Success;
            }
            LookupResult::Failure { message, .. } => {
                self.note = Some(Note::new(Tone::Warn, message));
                self.output = None;
                self.phase = LookupPhase::Failure;
            }
        }
    }

    pub fn result(&self) -> Option<&RiskScore> {
        self.result.as_ref()
    }

    pub fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    pub fn output(&self) -> Option<&serde_json::Value> {
        self.output.as_ref()
    }

    /// Pretty-printed lookup record, if one is shown
    pub fn output_pretty(&self) -> Option<String> {
        self.output
            .as_ref()
            .and_then(|v| serde_json::to_string_pretty(v).ok())
    }

    pub fn phase(&self) -> LookupPhase {
        self.phase
    }

    /// Lookups started but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn hide_lookup(&mut self) {
        self.note = None;
        self.output = None;
    }
}
