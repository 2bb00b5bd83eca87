//! DialogueMachine — interprets each utterance against the current step,
//! validates it, calls the backend where needed, and returns the next prompt.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::AuthBackend;
use crate::config::DialogueConfig;

use super::classifier::{Command, CommandClassifier, GlobalIntent};
use super::prompts::{ErrorKind, OutgoingPrompt, PromptCatalog};
use super::state::{DialogueState, Step};
use super::validator::{
    accept_password, confirm_password, validate_email, validate_full_name, validate_username,
};

/// What a turn means for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The dialogue continues; show the prompt.
    Continue,
    /// Nothing to do for this utterance (blank, or free text at `Login`).
    Ignored,
    /// Signup finished; the caller leaves the dialogue.
    AccountCreated { username: String },
}

/// Result of handling one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Text to display or speak, if any.
    pub prompt: Option<OutgoingPrompt>,
    pub outcome: TurnOutcome,
}

impl Turn {
    fn next(prompt: OutgoingPrompt) -> Self {
        Self {
            prompt: Some(prompt),
            outcome: TurnOutcome::Continue,
        }
    }

    fn ignored() -> Self {
        Self {
            prompt: None,
            outcome: TurnOutcome::Ignored,
        }
    }
}

/// The authentication dialogue.
///
/// Holds no per-session data: every call receives the session's
/// [`DialogueState`] explicitly.
pub struct DialogueMachine {
    pub(crate) backend: Arc<dyn AuthBackend>,
    classifier: CommandClassifier,
    pub(crate) prompts: PromptCatalog,
}

impl DialogueMachine {
    pub fn new(config: &DialogueConfig, backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            classifier: CommandClassifier::new(&config.synonyms),
            prompts: config.prompts.clone(),
        }
    }

    pub fn prompts(&self) -> &PromptCatalog {
        &self.prompts
    }

    /// Fresh state for a new session, with the login prompt.
    pub fn start(&self) -> (DialogueState, OutgoingPrompt) {
        let state = DialogueState::default();
        let prompt = OutgoingPrompt::prompt(self.prompts.for_step(state.step));
        (state, prompt)
    }

    /// Handle one utterance.
    ///
    /// Runs to completion, including any backend call. `busy` is set for the
    /// duration and `last_error` holds at most one error afterwards.
    pub async fn handle_utterance(&self, state: &mut DialogueState, utterance: &str) -> Turn {
        state.busy = true;
        state.last_error = None;

        let turn = match self.classifier.classify(utterance) {
            Command::Global(intent) => self.switch_flow(state, intent),
            Command::Empty => {
                debug!(step = %state.step, "Ignoring blank utterance");
                Turn::ignored()
            }
            Command::StepInput(_) if state.step == Step::Login => {
                debug!("Ignoring free text at login; manual login uses the form");
                Turn::ignored()
            }
            Command::StepInput(text) => self.handle_step_input(state, &text).await,
        };

        state.busy = false;
        turn
    }

    fn switch_flow(&self, state: &mut DialogueState, intent: GlobalIntent) -> Turn {
        let target = match intent {
            GlobalIntent::Login => Step::Login,
            GlobalIntent::Signup => Step::CollectFullName,
        };
        info!(from = %state.step, to = %target, "Global intent, restarting flow");
        state.restart_at(target);
        Turn::next(OutgoingPrompt::prompt(self.prompts.for_step(target)))
    }

    async fn handle_step_input(&self, state: &mut DialogueState, text: &str) -> Turn {
        match state.step {
            Step::Login => Turn::ignored(),
            Step::CollectFullName => match validate_full_name(text) {
                Ok(name) => {
                    state.draft.full_name = Some(name);
                    self.advance(state)
                }
                Err(_) => self.reject(state, ErrorKind::Validation, self.prompts.empty_field.clone()),
            },
            Step::CollectUsername => self.collect_username(state, text).await,
            Step::CollectEmail => match validate_email(text) {
                Ok(email) => {
                    state.draft.email = Some(email);
                    self.advance(state)
                }
                Err(_) => {
                    self.reject(state, ErrorKind::Validation, self.prompts.invalid_email.clone())
                }
            },
            Step::CollectPassword => {
                state.draft.password = Some(accept_password(text));
                self.advance(state)
            }
            Step::ConfirmPassword => self.confirm_and_create(state, text).await,
        }
    }

    async fn collect_username(&self, state: &mut DialogueState, text: &str) -> Turn {
        let username = match validate_username(text) {
            Ok(username) => username,
            Err(_) => {
                return self.reject(state, ErrorKind::Validation, self.prompts.empty_field.clone());
            }
        };

        match self.backend.is_identifier_taken(&username).await {
            Ok(false) => {
                state.draft.username = Some(username);
                self.advance(state)
            }
            Ok(true) => {
                info!(username = %username, "Username unavailable");
                self.reject(state, ErrorKind::Rejection, self.prompts.username_taken.clone())
            }
            Err(e) => {
                warn!(username = %username, error = %e, "Username availability check failed");
                let message = self.prompts.failure_or_generic(&e.message());
                self.reject(state, ErrorKind::Failure, message)
            }
        }
    }

    async fn confirm_and_create(&self, state: &mut DialogueState, text: &str) -> Turn {
        if confirm_password(state.draft.password.as_ref(), text).is_err() {
            info!("Password confirmation mismatch, back to password step");
            state.draft.password = None;
            state.transition(Step::CollectPassword);
            return self.reject(state, ErrorKind::Validation, self.prompts.password_mismatch.clone());
        }

        let Some(account) = state.draft.to_new_account() else {
            warn!(step = %state.step, "Signup draft incomplete at confirmation");
            return self.fail_signup(state, ErrorKind::Failure);
        };

        match self.backend.create_account(&account).await {
            Ok(true) => {
                info!(username = %account.username, "Account created");
                state.restart_at(Step::Login);
                Turn {
                    prompt: Some(OutgoingPrompt::info(self.prompts.account_created.clone())),
                    outcome: TurnOutcome::AccountCreated {
                        username: account.username,
                    },
                }
            }
            Ok(false) => {
                info!(username = %account.username, "Account creation refused");
                self.fail_signup(state, ErrorKind::Rejection)
            }
            Err(e) => {
                warn!(username = %account.username, error = %e, "Account creation failed");
                self.fail_signup(state, ErrorKind::Failure)
            }
        }
    }

    fn advance(&self, state: &mut DialogueState) -> Turn {
        match state.advance() {
            Ok(next) => Turn::next(OutgoingPrompt::prompt(self.prompts.for_step(next))),
            Err(e) => {
                warn!(step = %state.step, "Failed to advance: {}", e);
                self.reject(state, ErrorKind::Failure, self.prompts.generic_failure.clone())
            }
        }
    }

    /// Terminal signup failure: drop the draft and fall back to login.
    fn fail_signup(&self, state: &mut DialogueState, kind: ErrorKind) -> Turn {
        state.restart_at(Step::Login);
        self.reject(state, kind, self.prompts.account_creation_failed.clone())
    }

    fn reject(&self, state: &mut DialogueState, kind: ErrorKind, message: String) -> Turn {
        state.set_error(message.clone());
        Turn::next(OutgoingPrompt::error(kind, message))
    }
}
