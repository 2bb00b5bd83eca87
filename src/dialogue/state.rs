//! Dialogue state — which step the user is on and what has been collected.

use serde::{Deserialize, Serialize};

use super::model::SignupDraft;

/// The steps of the authentication dialogue.
///
/// `Login` is the initial step and the reset target. The signup flow walks
/// CollectFullName → CollectUsername → CollectEmail → CollectPassword →
/// ConfirmPassword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Login,
    CollectFullName,
    CollectUsername,
    CollectEmail,
    CollectPassword,
    ConfirmPassword,
}

impl Step {
    /// All steps in dialogue order.
    pub const ALL: [Step; 6] = [
        Step::Login,
        Step::CollectFullName,
        Step::CollectUsername,
        Step::CollectEmail,
        Step::CollectPassword,
        Step::ConfirmPassword,
    ];

    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Step) -> bool {
        use Step::*;
        matches!(
            (self, target),
            (_, Login)
                | (_, CollectFullName)
                | (CollectFullName, CollectUsername)
                | (CollectUsername, CollectEmail)
                | (CollectEmail, CollectPassword)
                | (CollectPassword, ConfirmPassword)
                | (ConfirmPassword, CollectPassword)
        )
    }

    /// Get the next step of the signup flow, if any.
    ///
    /// `Login` has no successor: signup is only entered through the signup
    /// intent.
    pub fn next(&self) -> Option<Step> {
        use Step::*;
        match self {
            Login => None,
            CollectFullName => Some(CollectUsername),
            CollectUsername => Some(CollectEmail),
            CollectEmail => Some(CollectPassword),
            CollectPassword => Some(ConfirmPassword),
            ConfirmPassword => None,
        }
    }

    /// Whether this step belongs to the signup flow.
    pub fn is_signup(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::Login
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Login => "login",
            Self::CollectFullName => "collect_full_name",
            Self::CollectUsername => "collect_username",
            Self::CollectEmail => "collect_email",
            Self::CollectPassword => "collect_password",
            Self::ConfirmPassword => "confirm_password",
        };
        write!(f, "{s}")
    }
}

/// State of one authentication session.
///
/// Exclusively owned by the session and threaded through every
/// [`DialogueMachine`](super::machine::DialogueMachine) call.
#[derive(Debug, Default)]
pub struct DialogueState {
    /// Current step.
    pub step: Step,
    /// Signup fields collected so far.
    pub draft: SignupDraft,
    /// Error emitted during the latest input-processing cycle, if any.
    pub last_error: Option<String>,
    /// True while a backend call is in flight.
    pub busy: bool,
}

impl DialogueState {
    /// Move to `target`, logging the transition.
    ///
    /// Invalid transitions are refused and logged; the step is left as is.
    pub(crate) fn transition(&mut self, target: Step) -> bool {
        if !self.step.can_transition_to(target) {
            tracing::warn!(from = %self.step, to = %target, "Refusing invalid step transition");
            return false;
        }
        tracing::debug!(from = %self.step, to = %target, "Step transition");
        self.step = target;
        true
    }

    /// Advance to the next signup step.
    pub(crate) fn advance(&mut self) -> Result<Step, String> {
        let next = self
            .step
            .next()
            .ok_or_else(|| format!("No step follows {}", self.step))?;
        if !self.transition(next) {
            return Err(format!("Cannot transition from {} to {}", self.step, next));
        }
        Ok(next)
    }

    /// Clear the draft and return to `target` (`Login` or `CollectFullName`).
    pub(crate) fn restart_at(&mut self, target: Step) {
        self.draft.clear();
        self.transition(target);
    }

    /// Record the error for this cycle. Only the first one sticks.
    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        if self.last_error.is_none() {
            self.last_error = Some(message.into());
        }
    }
}
