//! Account registration form.

use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock};

use async_trait::async_trait;
use folio_domain::SignupRequest;
use tracing::{debug, info, warn};

use crate::forms::state::{lock, FieldValue, FormState, SubmitGuard};
use crate::forms::validation::{
    FieldDescriptor, FieldKind, FormDescriptor, ValidationErrors, Validator,
};
use crate::forms::{FormContext, FormController, SubmitOutcome, PROCESSING_LABEL};
use crate::notify::Notification;

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";

const SUCCESS_MESSAGE: &str = "Signup successful! Redirecting to login...";
const FALLBACK_FAILURE_MESSAGE: &str = "Signup failed. Please try again.";

pub fn signup_descriptor() -> &'static FormDescriptor {
    static DESCRIPTOR: OnceLock<FormDescriptor> = OnceLock::new();
    DESCRIPTOR.get_or_init(|| {
        FormDescriptor::new(
            "signup",
            vec![
                FieldDescriptor::new(
                    FIELD_NAME,
                    "Full Name",
                    FieldKind::Text,
                    Validator::MinLength(2, "Full name must be at least 2 characters"),
                )
                .with_placeholder("John Doe"),
                FieldDescriptor::new(
                    FIELD_EMAIL,
                    "Email",
                    FieldKind::Email,
                    Validator::Email("Enter a valid email address"),
                )
                .with_placeholder("m@example.com"),
                FieldDescriptor::new(
                    FIELD_PASSWORD,
                    "Password",
                    FieldKind::Password,
                    Validator::MinLength(6, "Password must be at least 6 characters long"),
                ),
            ],
        )
    })
}

fn empty_values() -> BTreeMap<String, FieldValue> {
    [FIELD_NAME, FIELD_EMAIL, FIELD_PASSWORD]
        .into_iter()
        .map(|key| (key.to_string(), FieldValue::from("")))
        .collect()
}

/// Controller behind the "Create your account" card.
pub struct SignupForm {
    ctx: FormContext,
    state: Mutex<FormState>,
}

impl SignupForm {
    pub fn new(ctx: FormContext) -> Self {
        Self {
            ctx,
            state: Mutex::new(FormState::new(empty_values())),
        }
    }

    pub fn value(&self, key: &str) -> FieldValue {
        lock(&self.state).value(key).clone()
    }

    pub fn errors(&self) -> ValidationErrors {
        lock(&self.state).errors().clone()
    }

    /// Inputs are disabled while a submission is outstanding.
    pub fn is_submitting(&self) -> bool {
        lock(&self.state).is_submitting()
    }

    pub fn reset(&self) {
        lock(&self.state).reset();
    }
}

#[async_trait]
impl FormController for SignupForm {
    fn descriptor(&self) -> &'static FormDescriptor {
        signup_descriptor()
    }

    fn heading(&self) -> String {
        "Create your account".into()
    }

    fn submit_label(&self) -> String {
        if self.is_submitting() {
            PROCESSING_LABEL.into()
        } else {
            "Sign Up".into()
        }
    }

    fn snapshot(&self) -> FormState {
        lock(&self.state).clone()
    }

    fn set_field(&self, key: &str, value: FieldValue) {
        let mut state = lock(&self.state);
        if state.is_submitting() {
            debug!(key, "ignoring edit while signup is outstanding");
            return;
        }
        if state.submit_count() > 0 {
            let outcome = signup_descriptor().validate_field(key, &value);
            state.errors_mut().record(key, outcome);
        }
        state.set(key, value);
    }

    async fn submit(&self) -> SubmitOutcome {
        let (request, _submitting) = {
            let mut state = lock(&self.state);
            if state.is_submitting() {
                return SubmitOutcome::Busy;
            }
            state.record_submit_attempt();
            let errors = signup_descriptor().validate(&state);
            state.set_errors(errors.clone());
            if !errors.is_empty() {
                debug!(invalid = errors.len(), "signup blocked by validation");
                return SubmitOutcome::Invalid(errors);
            }
            let request = SignupRequest {
                name: state.text(FIELD_NAME).to_string(),
                email: state.text(FIELD_EMAIL).to_string(),
                password: state.text(FIELD_PASSWORD).to_string(),
            };
            match SubmitGuard::begin(&mut state, &self.state) {
                Some(guard) => (request, guard),
                None => return SubmitOutcome::Busy,
            }
        };

        info!(email = %request.email, "submitting signup");
        match self.ctx.api.signup(request).await {
            Ok(response) if response.success => {
                self.ctx.notifier.notify(Notification::success(SUCCESS_MESSAGE));
                self.ctx.navigator.push(&self.ctx.routes.login);
                SubmitOutcome::Submitted
            }
            Ok(response) => {
                debug!(message = ?response.message, "signup answered without success");
                SubmitOutcome::Rejected(response.message)
            }
            Err(error) => {
                warn!(%error, "signup failed");
                let message = error
                    .server_message()
                    .unwrap_or(FALLBACK_FAILURE_MESSAGE)
                    .to_string();
                self.ctx.notifier.notify(Notification::error(message));
                SubmitOutcome::Failed(error)
            }
        }
    }
}
