//! Notices and confirmation prompts shown around dashboard actions.
//!
//! The dashboard only sees the [`Alerts`] capability, so the same controller
//! drives the terminal front end and the recording fakes used in tests.

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// How long success and error notices stay up before closing themselves.
pub const AUTO_DISMISS: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    /// Result of a destructive action that went through.
    Destructive,
}

/// A single message for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
    /// `None` means the notice waits for the user to close it.
    pub auto_dismiss: Option<Duration>,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            body: String::new(),
            auto_dismiss: Some(AUTO_DISMISS),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            body: String::new(),
            auto_dismiss: Some(AUTO_DISMISS),
        }
    }

    pub fn destructive(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Destructive,
            title: title.into(),
            body: String::new(),
            auto_dismiss: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Keeps the notice up until the user closes it.
    pub fn sticky(mut self) -> Self {
        self.auto_dismiss = None;
        self
    }
}

/// A yes/no question asked before a destructive action.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub title: String,
    pub body: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Confirmation {
    pub fn delete_food() -> Self {
        Self {
            title: "Are you sure you want to delete it?".to_string(),
            body: "Once deleted, this plate cannot be recovered".to_string(),
            confirm_label: "Yes, delete it!".to_string(),
            cancel_label: "No, go back!".to_string(),
        }
    }
}

/// How a confirmation prompt was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    /// The user picked the cancel choice.
    Cancelled,
    /// The prompt went away without an answer.
    Dismissed,
}

pub trait Alerts {
    fn notify(&self, notice: Notice);

    fn notify_success(&self, message: impl Into<String>) {
        self.notify(Notice::success(message));
    }

    fn notify_error(&self, message: impl Into<String>) {
        self.notify(Notice::error(message));
    }

    /// Resolves once the user has answered (or walked away from) the prompt.
    fn confirm_destructive(
        &self,
        confirmation: &Confirmation,
    ) -> impl Future<Output = ConfirmOutcome> + Send;
}

/// Alerts rendered on stdout, confirmations read from stdin.
#[derive(Debug, Clone, Default)]
pub struct TerminalAlerts {
    assume_yes: bool,
}

impl TerminalAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every confirmation with yes (`--force`).
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    fn render(notice: &Notice) -> String {
        let marker = match notice.level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Error => "✗",
            NoticeLevel::Destructive => "⚠",
        };

        if notice.body.is_empty() {
            format!("{} {}", marker, notice.title)
        } else {
            format!("{} {}\n  {}", marker, notice.title, notice.body)
        }
    }
}

impl Alerts for TerminalAlerts {
    fn notify(&self, notice: Notice) {
        println!("{}", Self::render(&notice));
    }

    async fn confirm_destructive(&self, confirmation: &Confirmation) -> ConfirmOutcome {
        if self.assume_yes {
            return ConfirmOutcome::Confirmed;
        }

        let prompt = format!(
            "{}\n{}\n[y] {}  [n] {}\n> ",
            confirmation.title,
            confirmation.body,
            confirmation.confirm_label,
            confirmation.cancel_label
        );

        tokio::task::spawn_blocking(move || read_answer(&prompt))
            .await
            .unwrap_or(ConfirmOutcome::Dismissed)
    }
}

fn read_answer(prompt: &str) -> ConfirmOutcome {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return ConfirmOutcome::Dismissed;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => parse_answer(None),
        Ok(_) => parse_answer(Some(&input)),
    }
}

/// Maps a line of user input to an outcome. `None` is end of input.
fn parse_answer(line: Option<&str>) -> ConfirmOutcome {
    let Some(line) = line else {
        return ConfirmOutcome::Dismissed;
    };

    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => ConfirmOutcome::Confirmed,
        "" | "n" | "no" => ConfirmOutcome::Cancelled,
        _ => ConfirmOutcome::Dismissed,
    }
}
