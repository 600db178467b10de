//! Field values, inline errors and the submitting flag of one form instance.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use folio_domain::ImageUpload;

use crate::forms::validation::ValidationErrors;

static EMPTY: FieldValue = FieldValue::Empty;

/// Current value of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    /// A freshly chosen local file. Never a remote URL.
    File(ImageUpload),
}

impl FieldValue {
    /// Text content; empty for files and unset fields.
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Empty | FieldValue::File(_) => "",
        }
    }

    pub fn as_file(&self) -> Option<&ImageUpload> {
        match self {
            FieldValue::File(upload) => Some(upload),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::File(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<ImageUpload> for FieldValue {
    fn from(value: ImageUpload) -> Self {
        FieldValue::File(value)
    }
}

impl From<Option<ImageUpload>> for FieldValue {
    fn from(value: Option<ImageUpload>) -> Self {
        value.map(FieldValue::File).unwrap_or(FieldValue::Empty)
    }
}

/// Mutable state owned by a single form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
    defaults: BTreeMap<String, FieldValue>,
    errors: ValidationErrors,
    submitting: bool,
    submit_count: u32,
}

impl FormState {
    pub fn new(defaults: BTreeMap<String, FieldValue>) -> Self {
        Self {
            values: defaults.clone(),
            defaults,
            ..Self::default()
        }
    }

    /// Value of `key`, or [`FieldValue::Empty`] when unset.
    pub fn value(&self, key: &str) -> &FieldValue {
        self.values.get(key).unwrap_or(&EMPTY)
    }

    pub fn text(&self, key: &str) -> &str {
        self.value(key).as_text()
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn set(&mut self, key: &str, value: FieldValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Replaces every value and makes them the new defaults. Errors and the
    /// submit counter start over.
    pub fn reset_to(&mut self, values: BTreeMap<String, FieldValue>) {
        self.values = values.clone();
        self.defaults = values;
        self.errors = ValidationErrors::new();
        self.submit_count = 0;
    }

    /// Restores the current defaults.
    pub fn reset(&mut self) {
        let defaults = self.defaults.clone();
        self.reset_to(defaults);
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }

    pub fn set_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn record_submit_attempt(&mut self) {
        self.submit_count = self.submit_count.saturating_add(1);
    }
}

impl AsMut<FormState> for FormState {
    fn as_mut(&mut self) -> &mut FormState {
        self
    }
}

pub(crate) fn lock<T>(cell: &Mutex<T>) -> MutexGuard<'_, T> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the `submitting` flag for the duration of a submission.
///
/// Dropping the guard clears the flag, so every exit path resets it: success,
/// failure, a panic in a collaborator, or the submit future being dropped.
pub(crate) struct SubmitGuard<'a, T: AsMut<FormState>> {
    cell: &'a Mutex<T>,
}

impl<'a, T: AsMut<FormState>> SubmitGuard<'a, T> {
    /// Sets `submitting` unless a submission is already outstanding.
    pub(crate) fn begin(guard: &mut MutexGuard<'_, T>, cell: &'a Mutex<T>) -> Option<Self> {
        let state = AsMut::<FormState>::as_mut(&mut **guard);
        if state.submitting {
            return None;
        }
        state.submitting = true;
        Some(Self { cell })
    }
}

impl<T: AsMut<FormState>> Drop for SubmitGuard<'_, T> {
    fn drop(&mut self) {
        let mut guard = lock(self.cell);
        AsMut::<FormState>::as_mut(&mut *guard).submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> BTreeMap<String, FieldValue> {
        BTreeMap::from([
            ("name".to_string(), FieldValue::from("")),
            ("image".to_string(), FieldValue::Empty),
        ])
    }

    #[test]
    fn unset_fields_read_as_empty() {
        let state = FormState::new(BTreeMap::new());
        assert_eq!(state.value("anything"), &FieldValue::Empty);
        assert_eq!(state.text("anything"), "");
    }

    #[test]
    fn reset_restores_defaults_and_clears_errors() {
        let mut state = FormState::new(defaults());
        state.set("name", "Edited".into());
        state.errors_mut().insert("name", "bad");
        state.record_submit_attempt();

        state.reset();

        assert_eq!(state.text("name"), "");
        assert!(state.errors().is_empty());
        assert_eq!(state.submit_count(), 0);
    }

    #[test]
    fn reset_to_replaces_defaults() {
        let mut state = FormState::new(defaults());
        state.reset_to(BTreeMap::from([("name".to_string(), "Prefilled".into())]));
        state.set("name", "Typed".into());

        state.reset();

        assert_eq!(state.text("name"), "Prefilled");
    }

    #[test]
    fn file_values_have_no_text() {
        let upload = ImageUpload::new("a.png", "image/png", vec![0]);
        let value = FieldValue::from(Some(upload.clone()));
        assert_eq!(value.as_text(), "");
        assert_eq!(value.as_file(), Some(&upload));
        assert!(!value.is_empty());
        assert_eq!(FieldValue::from(None::<ImageUpload>), FieldValue::Empty);
    }

    #[test]
    fn guard_refuses_second_submission_and_clears_on_drop() {
        let cell = Mutex::new(FormState::default());
        {
            let mut guard = lock(&cell);
            let submit = SubmitGuard::begin(&mut guard, &cell);
            assert!(submit.is_some());
            assert!(guard.is_submitting());
            assert!(SubmitGuard::begin(&mut guard, &cell).is_none());
            drop(guard);
            drop(submit);
        }
        assert!(!lock(&cell).is_submitting());
    }

    #[test]
    fn guard_clears_flag_when_unwinding() {
        let cell = Mutex::new(FormState::default());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut guard = lock(&cell);
            let _submit = SubmitGuard::begin(&mut guard, &cell);
            drop(guard);
            panic!("collaborator failed");
        }));
        assert!(result.is_err());
        assert!(!lock(&cell).is_submitting());
    }
}
