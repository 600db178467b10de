//! Transient success/failure messages shown to the user.

use std::fmt;

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, icon) = build_label(self.kind);
        write!(f, "{label}: {icon} {}", self.message)
    }
}

/// Receives notifications raised by the forms.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

fn build_label(kind: NotificationKind) -> (&'static str, &'static str) {
    match kind {
        NotificationKind::Success => ("SUCCESS", "[✓]"),
        NotificationKind::Error => ("ERROR", "[x]"),
    }
}

/// Prints notifications to stdout, coloured unless `plain` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    plain: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain() -> Self {
        Self { plain: true }
    }

    pub fn render(&self, notification: &Notification) -> String {
        let text = notification.to_string();
        if self.plain {
            return text;
        }
        match notification.kind {
            NotificationKind::Success => text.bright_green().to_string(),
            NotificationKind::Error => text.bright_red().to_string(),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        println!("{}", self.render(&notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_has_label_and_icon() {
        let notifier = ConsoleNotifier::plain();
        assert_eq!(
            notifier.render(&Notification::success("Portfolio added successfully")),
            "SUCCESS: [✓] Portfolio added successfully"
        );
        assert_eq!(
            notifier.render(&Notification::error("Something went wrong")),
            "ERROR: [x] Something went wrong"
        );
    }

    #[test]
    fn coloured_rendering_keeps_message() {
        let rendered = ConsoleNotifier::new().render(&Notification::error("boom"));
        assert!(rendered.contains("boom"));
    }
}
