use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

/// Message categories used by the terminal front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    FieldError,
    Section,
}

static PLAIN: AtomicBool = AtomicBool::new(false);

/// Disables colours; script mode output is matched by tests.
pub fn set_plain(plain: bool) {
    PLAIN.store(plain, Ordering::Relaxed);
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::FieldError => ("INVALID", "[x]"),
        MessageKind::Section => ("", ""),
    }
}

pub fn format_message(kind: MessageKind, message: impl fmt::Display, plain: bool) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => {
            let (label, icon) = build_label(kind);
            format!("{label}: {icon} {text}")
        }
    };
    if plain {
        return formatted;
    }
    match kind {
        MessageKind::Info => formatted,
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::FieldError => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = format_message(kind, message, PLAIN.load(Ordering::Relaxed));
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn section(message: impl fmt::Display) {
    print(MessageKind::Section, message);
}

/// Prints an inline message under the field it belongs to.
pub fn field_error(label: &str, message: &str) {
    print(MessageKind::FieldError, format!("{label}: {message}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_messages_carry_label_and_icon() {
        assert_eq!(
            format_message(MessageKind::FieldError, "Title: Title is required", true),
            "INVALID: [x] Title: Title is required"
        );
        assert_eq!(
            format_message(MessageKind::Section, " Add Portfolio ", true),
            "=== Add Portfolio ==="
        );
    }
}
