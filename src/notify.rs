//! Notification and confirmation services injected into the inventory client.
//!
//! The client only talks to the [`Notifier`] and [`Dialog`] traits; the TUI
//! provides a toast, the CLI prints to the console and reads stdin.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "✗",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

pub trait Dialog {
    fn confirm(&mut self, message: &str) -> bool;
}

/// An answer collected before the client asked (e.g. by the TUI confirm popup)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answered(pub bool);

impl Dialog for Answered {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

/// Prompts on stdout and reads a `y`/`n` answer from stdin
pub struct StdinDialog;

impl Dialog for StdinDialog {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("Could not read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints notifications for one-shot CLI commands
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Error messages already carry their context, so only warnings get a prefix
    fn line(message: &str, severity: Severity) -> String {
        match severity {
            Severity::Warning => format!("Warning: {}", message),
            Severity::Success | Severity::Info | Severity::Error => message.to_string(),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        let line = Self::line(message, severity);
        match severity {
            Severity::Success | Severity::Info => println!("{}", line),
            Severity::Warning | Severity::Error => eprintln!("{}", line),
        }
    }
}

/// A transient notification shown in the TUI info line
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

/// Keeps the latest notification as a toast that expires after a timeout
#[derive(Debug)]
pub struct ToastNotifier {
    toast: Option<Toast>,
    lifetime: Duration,
    desktop: bool,
}

impl ToastNotifier {
    pub fn new(lifetime: Duration, desktop: bool) -> Self {
        Self { toast: None, lifetime, desktop }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.toast = None;
    }

    /// Drop the toast once it has outlived its lifetime
    pub fn expire(&mut self, now: Instant) {
        if let Some(toast) = &self.toast {
            if now.duration_since(toast.shown_at) >= self.lifetime {
                self.toast = None;
            }
        }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.toast = Some(Toast {
            message: message.to_string(),
            severity,
            shown_at: Instant::now(),
        });

        if self.desktop && severity != Severity::Info {
            if let Err(e) = desktop_notification("SwagTrackr", message) {
                tracing::warn!("Desktop notification failed: {}", e);
                // Don't keep retrying on a session without a notification daemon
                self.desktop = false;
            }
        }
    }
}

fn desktop_notification(summary: &str, body: &str) -> Result<()> {
    notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .icon("package-x-generic")
        .show()?;
    Ok(())
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Records every notification for later assertions
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub messages: Vec<(String, Severity)>,
    }

    impl RecordingNotifier {
        pub fn last(&self) -> Option<&(String, Severity)> {
            self.messages.last()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, message: &str, severity: Severity) {
            self.messages.push((message.to_string(), severity));
        }
    }

    /// Answers with a fixed value and remembers the prompts it was shown
    #[derive(Debug, Default)]
    pub struct ScriptedDialog {
        pub answer: bool,
        pub prompts: Vec<String>,
    }

    impl ScriptedDialog {
        pub fn answering(answer: bool) -> Self {
            Self { answer, prompts: Vec::new() }
        }
    }

    impl Dialog for ScriptedDialog {
        fn confirm(&mut self, message: &str) -> bool {
            self.prompts.push(message.to_string());
            self.answer
        }
    }
}
