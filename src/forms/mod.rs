//! Headless form controllers for the dashboard.
//!
//! Each controller owns its [`FormState`], validates it against a static
//! [`FormDescriptor`], and talks to the outside world only through the
//! collaborators bundled in [`FormContext`].

pub mod mode;
pub mod portfolio;
pub mod prefill;
pub mod signup;
pub mod state;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use folio_config::{DashboardConfig, RouteSettings};

use crate::api::{DashboardApi, HttpDashboardApi};
use crate::errors::RequestError;
use crate::navigation::Navigator;
use crate::notify::Notifier;

pub use mode::{EditTarget, FormMode};
pub use portfolio::PortfolioForm;
pub use prefill::{PrefillCoordinator, PrefillState};
pub use signup::SignupForm;
pub use state::{FieldValue, FormState};
pub use validation::{
    FieldDescriptor, FieldKind, FormDescriptor, ValidationError, ValidationErrors, Validator,
};

/// Label of the submit control while a submission is outstanding.
pub const PROCESSING_LABEL: &str = "Processing...";

/// Collaborators injected into every form at construction.
#[derive(Clone)]
pub struct FormContext {
    pub api: Arc<dyn DashboardApi>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub routes: RouteSettings,
}

impl FormContext {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        routes: RouteSettings,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
            routes,
        }
    }

    /// Builds the HTTP client from `config` and pairs it with the given
    /// notifier and navigator.
    pub fn from_config(
        config: &DashboardConfig,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, RequestError> {
        let api = HttpDashboardApi::new(&config.api)?;
        Ok(Self::new(
            Arc::new(api),
            notifier,
            navigator,
            config.routes.clone(),
        ))
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The request succeeded; the user was notified and redirected.
    Submitted,
    /// Validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// The request failed; the user was notified and may retry.
    Failed(RequestError),
    /// The server answered without reporting success.
    Rejected(Option<String>),
    /// A submission was already outstanding; nothing was sent.
    Busy,
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Surface shared by the portfolio and signup forms, so front-ends can drive
/// either one.
#[async_trait]
pub trait FormController: Send + Sync {
    fn descriptor(&self) -> &'static FormDescriptor;

    fn heading(&self) -> String;

    fn submit_label(&self) -> String;

    fn snapshot(&self) -> FormState;

    fn set_field(&self, key: &str, value: FieldValue);

    /// Options of a [`FieldKind::Choice`] field.
    fn choices(&self, _key: &str) -> Vec<String> {
        Vec::new()
    }

    /// Leaves the form without submitting.
    fn cancel(&self) {}

    async fn submit(&self) -> SubmitOutcome;
}
