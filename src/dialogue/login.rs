//! Manual login — a single identifier/password form submission.

use tracing::{info, warn};

use crate::error::LoginError;

use super::machine::DialogueMachine;
use super::model::LoginForm;
use super::state::DialogueState;
use super::validator::validate_login_form;

impl DialogueMachine {
    /// Submit the manual login form.
    ///
    /// Empty fields fail locally without contacting the backend. Success only
    /// means the backend accepted the attempt; the signed-in session is
    /// reported through the backend's session-change notification.
    pub async fn submit_login(&self, state: &mut DialogueState, form: LoginForm) -> Result<(), LoginError> {
        state.last_error = None;

        if let Err(e) = validate_login_form(&form) {
            state.set_error(self.prompts.login_fields_required.clone());
            return Err(e.into());
        }

        state.busy = true;
        let result = self.backend.sign_in(form.identifier.trim(), &form.secret).await;
        state.busy = false;

        match result {
            Ok(()) => {
                info!(identifier = %form.identifier.trim(), "Sign-in accepted");
                Ok(())
            }
            Err(e) => {
                warn!(identifier = %form.identifier.trim(), error = %e, "Sign-in failed");
                state.set_error(self.prompts.failure_or_generic(&e.message()));
                Err(e.into())
            }
        }
    }
}
