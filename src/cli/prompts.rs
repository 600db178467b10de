use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use folio_domain::ImageUpload;

use crate::cli::output;
use crate::cli::CliError;
use crate::forms::{FieldDescriptor, FieldKind, FieldValue, FormController, ValidationErrors};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Source of field values for the terminal front-end.
pub trait FieldInput {
    fn text(&mut self, field: &FieldDescriptor, current: &str) -> Result<String, CliError>;

    fn secret(&mut self, field: &FieldDescriptor) -> Result<String, CliError>;

    fn choose(
        &mut self,
        field: &FieldDescriptor,
        options: &[String],
        current: &str,
    ) -> Result<String, CliError>;

    /// `None` leaves the file field as it is.
    fn file_path(&mut self, field: &FieldDescriptor) -> Result<Option<PathBuf>, CliError>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CliError>;
}

/// Interactive prompts on the controlling terminal.
pub struct DialoguerInput {
    theme: ColorfulTheme,
}

impl DialoguerInput {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldInput for DialoguerInput {
    fn text(&mut self, field: &FieldDescriptor, current: &str) -> Result<String, CliError> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(field.label)
            .allow_empty(true);
        if !current.is_empty() {
            input = input.default(current.to_string());
        } else if let Some(placeholder) = field.placeholder {
            input = input.with_prompt(format!("{} ({placeholder})", field.label));
        }
        Ok(input.interact_text()?)
    }

    fn secret(&mut self, field: &FieldDescriptor) -> Result<String, CliError> {
        Ok(Password::with_theme(&self.theme)
            .with_prompt(field.label)
            .allow_empty_password(true)
            .interact()?)
    }

    fn choose(
        &mut self,
        field: &FieldDescriptor,
        options: &[String],
        current: &str,
    ) -> Result<String, CliError> {
        if options.is_empty() {
            output::warning(format!("No options available for {}", field.label));
            return self.text(field, current);
        }
        let default = options
            .iter()
            .position(|option| option == current)
            .unwrap_or(0);
        let index = Select::with_theme(&self.theme)
            .with_prompt(field.placeholder.unwrap_or(field.label))
            .items(options)
            .default(default)
            .interact()?;
        Ok(options[index].clone())
    }

    fn file_path(&mut self, field: &FieldDescriptor) -> Result<Option<PathBuf>, CliError> {
        let raw = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("{} (path, blank to skip)", field.label))
            .allow_empty(true)
            .interact_text()?;
        let trimmed = raw.trim();
        Ok((!trimmed.is_empty()).then(|| PathBuf::from(trimmed)))
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CliError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }
}

/// Reads one line per prompt, for non-interactive runs.
///
/// An empty line keeps the current value. Running out of input while a field
/// is being asked for is an error; confirmations fall back to their default.
pub struct ScriptInput<R> {
    reader: R,
}

impl<R: BufRead> ScriptInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_line(&mut self) -> Result<Option<String>, CliError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn require_line(&mut self, field: &FieldDescriptor) -> Result<String, CliError> {
        self.next_line()?.ok_or_else(|| {
            CliError::Input(format!("input ended while asking for {}", field.label))
        })
    }
}

impl<R: BufRead> FieldInput for ScriptInput<R> {
    fn text(&mut self, field: &FieldDescriptor, current: &str) -> Result<String, CliError> {
        let line = self.require_line(field)?;
        if line.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(line)
        }
    }

    fn secret(&mut self, field: &FieldDescriptor) -> Result<String, CliError> {
        self.require_line(field)
    }

    fn choose(
        &mut self,
        field: &FieldDescriptor,
        options: &[String],
        current: &str,
    ) -> Result<String, CliError> {
        let line = self.text(field, current)?;
        if options.is_empty() || options.contains(&line) {
            Ok(line)
        } else {
            output::warning(format!("`{line}` is not one of: {}", options.join(", ")));
            Ok(current.to_string())
        }
    }

    fn file_path(&mut self, field: &FieldDescriptor) -> Result<Option<PathBuf>, CliError> {
        let line = self.require_line(field)?;
        let trimmed = line.trim();
        Ok((!trimmed.is_empty()).then(|| PathBuf::from(trimmed)))
    }

    fn confirm(&mut self, _prompt: &str, default: bool) -> Result<bool, CliError> {
        Ok(match self.next_line()? {
            Some(line) => match line.trim().to_ascii_lowercase().as_str() {
                "" => default,
                "y" | "yes" => true,
                _ => false,
            },
            None => default,
        })
    }
}

/// Reads a local file into an upload, guessing the content type from its
/// extension.
pub fn load_image(path: &Path) -> Result<ImageUpload, CliError> {
    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();
    let content_type =
        ImageUpload::content_type_for(&file_name).unwrap_or(FALLBACK_CONTENT_TYPE);
    Ok(ImageUpload::new(file_name, content_type, bytes))
}

/// Prompts for each field in declaration order. With `only`, just the fields
/// listed there are asked again, each preceded by its message.
pub fn fill_fields(
    controller: &dyn FormController,
    input: &mut dyn FieldInput,
    only: Option<&ValidationErrors>,
) -> Result<(), CliError> {
    for field in &controller.descriptor().fields {
        if let Some(errors) = only {
            match errors.get(field.key) {
                Some(message) => output::field_error(field.label, message),
                None => continue,
            }
        }

        let current = controller.snapshot().value(field.key).clone();
        let value = match field.kind {
            FieldKind::Text | FieldKind::TextArea | FieldKind::Email => {
                FieldValue::from(input.text(field, current.as_text())?)
            }
            FieldKind::Password => FieldValue::from(input.secret(field)?),
            FieldKind::Choice => {
                let options = controller.choices(field.key);
                FieldValue::from(input.choose(field, &options, current.as_text())?)
            }
            FieldKind::File => match input.file_path(field)? {
                Some(path) => match load_image(&path) {
                    Ok(upload) => FieldValue::from(upload),
                    Err(err) => {
                        output::warning(format!("Could not read {}: {err}", path.display()));
                        current
                    }
                },
                None => current,
            },
        };
        controller.set_field(field.key, value);
    }
    Ok(())
}
