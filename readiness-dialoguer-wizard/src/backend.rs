//! Dialoguer implementation of the [`Prompter`] trait.

use std::path::PathBuf;

use dialoguer::{Input, MultiSelect, Select, theme::ColorfulTheme};
use readiness::{ExportBlocked, TriState};
use thiserror::Error;

/// Error type for the wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    /// User cancelled the wizard (e.g., pressed Ctrl+C or Escape).
    #[error("Assessment cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// The answers may not be exported yet.
    #[error(transparent)]
    Blocked(#[from] ExportBlocked),

    /// The report could not be written.
    #[error("Failed to write report '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn lift(err: dialoguer::Error) -> WizardError {
    if is_cancelled(&err) {
        WizardError::Cancelled
    } else {
        WizardError::Dialoguer(err)
    }
}

/// One prompt per question kind.
///
/// The wizard drives a `Prompter` question by question; implementations
/// only deal with showing a prompt and reading the reply.
pub trait Prompter {
    /// Ask a yes / no / not-applicable question.
    fn tri(&self, prompt: &str, current: Option<TriState>) -> Result<TriState, WizardError>;

    /// Ask for free text. An optional question accepts an empty reply.
    fn text(&self, prompt: &str, current: &str, required: bool) -> Result<String, WizardError>;

    /// Pick one option; returns its index.
    fn choice(
        &self,
        prompt: &str,
        options: &[String],
        current: Option<usize>,
    ) -> Result<usize, WizardError>;

    /// Pick any number of options; returns their indices.
    fn choices(
        &self,
        prompt: &str,
        options: &[String],
        current: &[bool],
    ) -> Result<Vec<usize>, WizardError>;

    /// Show a message.
    fn note(&self, message: &str) {
        println!("{message}");
    }
}

/// Dialoguer prompter for interactive CLI prompts.
///
/// This prompter uses the `dialoguer` library to present questions
/// to the user in a command-line interface with colorful themes.
#[derive(Debug, Default, Clone)]
pub struct DialoguerWizard {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerWizard {
    /// Create a new wizard with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a wizard with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn select(
        &self,
        prompt: &str,
        items: &[&str],
        default: Option<usize>,
    ) -> Result<usize, WizardError> {
        let mut builder: Select;
        let _theme;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Select::with_theme(&_theme);
        } else {
            builder = Select::new();
        }

        builder = builder.with_prompt(prompt).items(items);
        if let Some(idx) = default {
            builder = builder.default(idx);
        }

        builder.interact().map_err(lift)
    }
}

impl Prompter for DialoguerWizard {
    fn tri(&self, prompt: &str, current: Option<TriState>) -> Result<TriState, WizardError> {
        let items: Vec<&str> = TriState::ALL.iter().map(|t| t.label()).collect();
        let default = current.and_then(|c| TriState::ALL.iter().position(|&t| t == c));
        let idx = self.select(prompt, &items, default)?;
        Ok(TriState::ALL.get(idx).copied().unwrap_or(TriState::Na))
    }

    fn text(&self, prompt: &str, current: &str, required: bool) -> Result<String, WizardError> {
        let _theme;
        let mut builder: Input<String>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        builder = builder.with_prompt(prompt).allow_empty(!required);
        if !current.is_empty() {
            builder = builder.default(current.to_string());
        }

        builder.interact_text().map_err(lift)
    }

    fn choice(
        &self,
        prompt: &str,
        options: &[String],
        current: Option<usize>,
    ) -> Result<usize, WizardError> {
        let items: Vec<&str> = options.iter().map(String::as_str).collect();
        self.select(prompt, &items, current)
    }

    fn choices(
        &self,
        prompt: &str,
        options: &[String],
        current: &[bool],
    ) -> Result<Vec<usize>, WizardError> {
        let mut builder: MultiSelect;
        let _theme;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = MultiSelect::with_theme(&_theme);
        } else {
            builder = MultiSelect::new();
        }

        builder = builder.with_prompt(prompt).items(options).defaults(current);

        builder.interact().map_err(lift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_creation() {
        let _wizard = DialoguerWizard::new();
        let _plain = DialoguerWizard::plain();
    }

    #[test]
    fn error_types() {
        let err = WizardError::Cancelled;
        assert_eq!(err.to_string(), "Assessment cancelled by user");

        let err = WizardError::Blocked(ExportBlocked {
            percent: 50,
            missing: vec!["NAR-ID".to_string()],
        });
        assert!(err.to_string().starts_with("Complete all questions"));
    }

    #[test]
    fn interrupted_io_is_cancellation() {
        let err = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
        assert!(matches!(lift(err), WizardError::Cancelled));

        let err = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(matches!(lift(err), WizardError::Dialoguer(_)));
    }
}
