//! Declarative field rules evaluated on submit and on field change.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::forms::state::{FieldValue, FormState};

// Local part and domain shape; leading dots and `..` runs are checked separately
// because the regex crate has no lookahead.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Field name to message for every failing field. A field that passed is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    /// Stores the outcome of validating a single field.
    pub fn record(&mut self, key: &str, outcome: Result<(), ValidationError>) {
        match outcome {
            Ok(()) => self.remove(key),
            Err(err) => self.insert(key, err.message),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// How a field is entered. Drives prompting in front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Password,
    Choice,
    File,
}

/// Built-in validation rules.
#[derive(Debug, Clone)]
pub enum Validator {
    None,
    /// At least `min` characters of text.
    MinLength(usize, &'static str),
    Email(&'static str),
    /// Optional file that must be an `image/*` upload when present.
    ImageFile(&'static str),
}

impl Validator {
    pub fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        match self {
            Validator::None => Ok(()),
            Validator::MinLength(min, message) => {
                if value.as_text().chars().count() >= *min {
                    Ok(())
                } else {
                    Err(ValidationError::new(*message))
                }
            }
            Validator::Email(message) => {
                if is_email(value.as_text()) {
                    Ok(())
                } else {
                    Err(ValidationError::new(*message))
                }
            }
            Validator::ImageFile(message) => match value {
                FieldValue::Empty => Ok(()),
                FieldValue::File(upload) if upload.is_image() => Ok(()),
                _ => Err(ValidationError::new(*message)),
            },
        }
    }
}

fn is_email(input: &str) -> bool {
    !input.starts_with('.') && !input.contains("..") && EMAIL_PATTERN.is_match(input)
}

/// Declarative description of a single form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub validator: Validator,
    pub placeholder: Option<&'static str>,
}

impl FieldDescriptor {
    pub fn new(
        key: &'static str,
        label: &'static str,
        kind: FieldKind,
        validator: Validator,
    ) -> Self {
        Self {
            key,
            label,
            kind,
            validator,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

/// Field order and rules of a whole form.
#[derive(Debug, Clone)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Validates one field; unknown keys always pass.
    pub fn validate_field(&self, key: &str, value: &FieldValue) -> Result<(), ValidationError> {
        match self.field(key) {
            Some(field) => field.validator.validate(value),
            None => Ok(()),
        }
    }

    /// Validates every declared field against `state`.
    pub fn validate(&self, state: &FormState) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in &self.fields {
            if let Err(err) = field.validator.validate(state.value(field.key)) {
                errors.insert(field.key, err.message);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::ImageUpload;

    fn descriptor() -> FormDescriptor {
        FormDescriptor::new(
            "test",
            vec![
                FieldDescriptor::new(
                    "title",
                    "Title",
                    FieldKind::Text,
                    Validator::MinLength(1, "Title is required"),
                ),
                FieldDescriptor::new(
                    "email",
                    "Email",
                    FieldKind::Email,
                    Validator::Email("Enter a valid email address"),
                ),
                FieldDescriptor::new(
                    "image",
                    "Image",
                    FieldKind::File,
                    Validator::ImageFile("Image must be an image file"),
                ),
            ],
        )
    }

    #[test]
    fn min_length_counts_characters_not_bytes() {
        let rule = Validator::MinLength(2, "too short");
        assert!(rule.validate(&FieldValue::from("é")).is_err());
        assert!(rule.validate(&FieldValue::from("éé")).is_ok());
        assert!(rule.validate(&FieldValue::Empty).is_err());
    }

    #[test]
    fn min_length_does_not_trim() {
        let rule = Validator::MinLength(1, "required");
        assert!(rule.validate(&FieldValue::from(" ")).is_ok());
    }

    #[test]
    fn email_pattern_accepts_common_addresses() {
        for ok in ["m@example.com", "first.last+tag@sub.example.co", "o'neil@mail.ie"] {
            assert!(is_email(ok), "{ok} should be accepted");
        }
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        for bad in [
            "",
            "plain",
            "@example.com",
            "user@",
            "user@example",
            ".user@example.com",
            "us..er@example.com",
            "user.@example.com",
            "user@-example.com",
            "user@example.c",
        ] {
            assert!(!is_email(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn image_rule_accepts_absent_or_image_uploads() {
        let rule = Validator::ImageFile("bad image");
        assert!(rule.validate(&FieldValue::Empty).is_ok());
        let png = ImageUpload::new("a.png", "image/png", vec![1, 2]);
        assert!(rule.validate(&FieldValue::File(png)).is_ok());
        let pdf = ImageUpload::new("a.pdf", "application/pdf", vec![1]);
        assert_eq!(
            rule.validate(&FieldValue::File(pdf)).unwrap_err().message,
            "bad image"
        );
    }

    #[test]
    fn validate_reports_only_failing_fields() {
        let descriptor = descriptor();
        let mut state = FormState::new(Default::default());
        state.set("title", FieldValue::from("Hello"));
        state.set("email", FieldValue::from("nope"));

        let errors = descriptor.validate(&state);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Enter a valid email address"));
        assert!(!errors.contains("title"));
        assert!(!errors.contains("image"));
    }

    #[test]
    fn validate_field_ignores_unknown_keys() {
        let descriptor = descriptor();
        assert!(descriptor.validate_field("missing", &FieldValue::Empty).is_ok());
    }

    #[test]
    fn record_inserts_and_clears() {
        let mut errors = ValidationErrors::new();
        errors.record("title", Err(ValidationError::new("Title is required")));
        assert_eq!(errors.get("title"), Some("Title is required"));
        errors.record("title", Ok(()));
        assert!(errors.is_empty());
    }
}
