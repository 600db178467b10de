//! Create/edit form for portfolio items.

use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock};

use async_trait::async_trait;
use folio_domain::{Category, Displayable, ImageUpload, PortfolioItem};
use tracing::{debug, info, warn};

use crate::api::PortfolioPayload;
use crate::forms::mode::{EditTarget, FormMode};
use crate::forms::prefill::{PrefillCoordinator, PrefillState};
use crate::forms::state::{lock, FieldValue, FormState, SubmitGuard};
use crate::forms::validation::{
    FieldDescriptor, FieldKind, FormDescriptor, ValidationErrors, Validator,
};
use crate::forms::{FormContext, FormController, SubmitOutcome, PROCESSING_LABEL};
use crate::notify::Notification;

pub const FIELD_NAME: &str = "name";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_IMAGE: &str = "image";

const CREATED_MESSAGE: &str = "Portfolio added successfully";
const UPDATED_MESSAGE: &str = "Portfolio updated successfully";
const FAILED_MESSAGE: &str = "Something went wrong";

/// Field order and rules of the portfolio form.
pub fn portfolio_descriptor() -> &'static FormDescriptor {
    static DESCRIPTOR: OnceLock<FormDescriptor> = OnceLock::new();
    DESCRIPTOR.get_or_init(|| {
        FormDescriptor::new(
            "portfolio",
            vec![
                FieldDescriptor::new(
                    FIELD_NAME,
                    "Title",
                    FieldKind::Text,
                    Validator::MinLength(1, "Title is required"),
                )
                .with_placeholder("Enter title"),
                FieldDescriptor::new(
                    FIELD_CATEGORY,
                    "Category",
                    FieldKind::Choice,
                    Validator::MinLength(1, "Category is required"),
                )
                .with_placeholder("Select category"),
                FieldDescriptor::new(
                    FIELD_DESCRIPTION,
                    "Description",
                    FieldKind::TextArea,
                    Validator::MinLength(5, "Description is required"),
                )
                .with_placeholder("Enter description"),
                FieldDescriptor::new(
                    FIELD_IMAGE,
                    "Image",
                    FieldKind::File,
                    Validator::ImageFile("Image must be an image file"),
                ),
            ],
        )
    })
}

fn empty_values() -> BTreeMap<String, FieldValue> {
    BTreeMap::from([
        (FIELD_NAME.to_string(), FieldValue::from("")),
        (FIELD_CATEGORY.to_string(), FieldValue::from("")),
        (FIELD_DESCRIPTION.to_string(), FieldValue::from("")),
        (FIELD_IMAGE.to_string(), FieldValue::Empty),
    ])
}

// The stored image is a remote URL and is never copied into the form.
fn values_from_record(record: &PortfolioItem) -> BTreeMap<String, FieldValue> {
    BTreeMap::from([
        (FIELD_NAME.to_string(), FieldValue::from(record.name.as_str())),
        (
            FIELD_CATEGORY.to_string(),
            FieldValue::from(record.category.as_str()),
        ),
        (
            FIELD_DESCRIPTION.to_string(),
            FieldValue::from(record.description.as_str()),
        ),
        (FIELD_IMAGE.to_string(), FieldValue::Empty),
    ])
}

fn build_payload(state: &FormState, mode: &FormMode) -> PortfolioPayload {
    PortfolioPayload {
        name: state.text(FIELD_NAME).to_string(),
        category: state.text(FIELD_CATEGORY).to_string(),
        description: state.text(FIELD_DESCRIPTION).to_string(),
        image: state.value(FIELD_IMAGE).as_file().cloned(),
        id: mode.target().map(|target| target.as_str().to_string()),
    }
}

struct PortfolioInner {
    state: FormState,
    categories: Vec<Category>,
    portfolios: Vec<PortfolioItem>,
    prefill: PrefillCoordinator,
}

impl AsMut<FormState> for PortfolioInner {
    fn as_mut(&mut self) -> &mut FormState {
        &mut self.state
    }
}

/// Controller behind the "Add/Edit Portfolio" page.
pub struct PortfolioForm {
    ctx: FormContext,
    mode: FormMode,
    inner: Mutex<PortfolioInner>,
}

impl PortfolioForm {
    /// `target` is the page's `id` query parameter; `None` selects create mode.
    pub fn new(ctx: FormContext, target: Option<EditTarget>) -> Self {
        Self {
            ctx,
            mode: FormMode::from_target(target),
            inner: Mutex::new(PortfolioInner {
                state: FormState::new(empty_values()),
                categories: Vec::new(),
                portfolios: Vec::new(),
                prefill: PrefillCoordinator::new(),
            }),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Fetches categories and existing items concurrently, then runs prefill.
    ///
    /// A failure of either request is logged and leaves both lists empty.
    pub async fn load(&self) {
        let fetched = futures::try_join!(
            self.ctx.api.list_categories(),
            self.ctx.api.list_portfolios()
        );
        match fetched {
            Ok((categories, portfolios)) => {
                debug!(
                    categories = categories.len(),
                    portfolios = portfolios.len(),
                    "reference data loaded"
                );
                self.set_reference_data(categories, portfolios);
            }
            Err(error) => warn!(%error, "failed to load reference data"),
        }
    }

    /// Stores the reference lists and gives the prefill coordinator a chance
    /// to run.
    pub fn set_reference_data(&self, categories: Vec<Category>, portfolios: Vec<PortfolioItem>) {
        let mut inner = lock(&self.inner);
        inner.categories = categories;
        inner.portfolios = portfolios;

        let PortfolioInner {
            state,
            portfolios: items,
            prefill,
            ..
        } = &mut *inner;
        if let Some(record) = prefill.advance(self.mode.target(), items.as_slice()) {
            state.reset_to(values_from_record(record));
        }
    }

    pub fn prefill_state(&self) -> PrefillState {
        lock(&self.inner).prefill.state()
    }

    pub fn categories(&self) -> Vec<Category> {
        lock(&self.inner).categories.clone()
    }

    pub fn portfolios(&self) -> Vec<PortfolioItem> {
        lock(&self.inner).portfolios.clone()
    }

    /// Values offered by the category select. The form stores the name.
    pub fn category_options(&self) -> Vec<String> {
        lock(&self.inner)
            .categories
            .iter()
            .map(Displayable::display_label)
            .collect()
    }

    pub fn value(&self, key: &str) -> FieldValue {
        lock(&self.inner).state.value(key).clone()
    }

    pub fn errors(&self) -> ValidationErrors {
        lock(&self.inner).state.errors().clone()
    }

    pub fn is_submitting(&self) -> bool {
        lock(&self.inner).state.is_submitting()
    }

    pub fn set_image(&self, image: Option<ImageUpload>) {
        self.set_field(FIELD_IMAGE, FieldValue::from(image));
    }

    /// Restores the last defaults: empty in create mode, the prefilled record
    /// once edit mode has filled.
    pub fn reset(&self) {
        lock(&self.inner).state.reset();
    }
}

#[async_trait]
impl FormController for PortfolioForm {
    fn descriptor(&self) -> &'static FormDescriptor {
        portfolio_descriptor()
    }

    fn heading(&self) -> String {
        if self.mode.is_edit() {
            "Edit Portfolio".into()
        } else {
            "Add Portfolio".into()
        }
    }

    fn submit_label(&self) -> String {
        if self.is_submitting() {
            PROCESSING_LABEL.into()
        } else if self.mode.is_edit() {
            "Update Portfolio".into()
        } else {
            "Add Portfolio".into()
        }
    }

    fn snapshot(&self) -> FormState {
        lock(&self.inner).state.clone()
    }

    /// Updates one field. After the first submit attempt the field is
    /// re-validated on every change. Edits stay open while a submission is
    /// outstanding; the payload already sent is unaffected.
    fn set_field(&self, key: &str, value: FieldValue) {
        let mut inner = lock(&self.inner);
        if inner.state.submit_count() > 0 {
            let outcome = portfolio_descriptor().validate_field(key, &value);
            inner.state.errors_mut().record(key, outcome);
        }
        inner.state.set(key, value);
    }

    fn choices(&self, key: &str) -> Vec<String> {
        if key == FIELD_CATEGORY {
            self.category_options()
        } else {
            Vec::new()
        }
    }

    fn cancel(&self) {
        self.ctx.navigator.push(&self.ctx.routes.portfolio_listing);
    }

    async fn submit(&self) -> SubmitOutcome {
        let (payload, _submitting) = {
            let mut inner = lock(&self.inner);
            if inner.state.is_submitting() {
                return SubmitOutcome::Busy;
            }
            inner.state.record_submit_attempt();
            let errors = portfolio_descriptor().validate(&inner.state);
            inner.state.set_errors(errors.clone());
            if !errors.is_empty() {
                debug!(invalid = errors.len(), "portfolio submission blocked by validation");
                return SubmitOutcome::Invalid(errors);
            }
            let payload = build_payload(&inner.state, &self.mode);
            match SubmitGuard::begin(&mut inner, &self.inner) {
                Some(guard) => (payload, guard),
                None => return SubmitOutcome::Busy,
            }
        };

        let (result, message) = match &self.mode {
            FormMode::Create => {
                info!("creating portfolio item");
                (self.ctx.api.create_portfolio(payload).await, CREATED_MESSAGE)
            }
            FormMode::Edit(target) => {
                info!(id = %target, "updating portfolio item");
                (self.ctx.api.update_portfolio(payload).await, UPDATED_MESSAGE)
            }
        };

        match result {
            Ok(()) => {
                self.ctx.notifier.notify(Notification::success(message));
                self.ctx.navigator.push(&self.ctx.routes.portfolio_listing);
                SubmitOutcome::Submitted
            }
            Err(error) => {
                warn!(%error, "portfolio submission failed");
                self.ctx.notifier.notify(Notification::error(FAILED_MESSAGE));
                SubmitOutcome::Failed(error)
            }
        }
    }
}
