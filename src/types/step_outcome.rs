use std::time::Duration;

use colored::*;

use crate::{
    errors::StepError,
    types::StepAction,
    utils::{pad_dots, short_name},
};

pub const NOTHING_TO_RUN_NAME: &str = "n/a";
pub const NOTHING_TO_RUN_MESSAGE: &str = "No migrations found to run";

/// What a successful step reported back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub message: Option<String>,
    pub duration: Option<Duration>,
}

impl StepReport {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            duration: None,
        }
    }
}

/// Result of visiting one migration during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub name: String,
    pub action: StepAction,
    pub result: Result<StepReport, StepError>,
}

impl StepOutcome {
    pub fn skipped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            action: StepAction::Skip,
            result: Ok(StepReport::default()),
        }
    }

    pub fn completed(name: &str, action: StepAction, report: StepReport) -> Self {
        Self {
            name: name.to_string(),
            action,
            result: Ok(report),
        }
    }

    pub fn failed(name: &str, action: StepAction, error: StepError) -> Self {
        Self {
            name: name.to_string(),
            action,
            result: Err(error),
        }
    }

    /// The single-element result returned whenever a mode has nothing to do.
    pub fn nothing_to_run() -> Vec<Self> {
        vec![Self::completed(
            NOTHING_TO_RUN_NAME,
            StepAction::Skip,
            StepReport::with_message(NOTHING_TO_RUN_MESSAGE),
        )]
    }

    pub fn is_nothing_to_run(&self) -> bool {
        self.name == NOTHING_TO_RUN_NAME && self.action == StepAction::Skip
    }

    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }

    pub fn error(&self) -> Option<&StepError> {
        self.result.as_ref().err()
    }

    pub fn message(&self) -> Option<&str> {
        self.result.as_ref().ok().and_then(|r| r.message.as_deref())
    }

    pub fn duration(&self) -> Option<Duration> {
        self.result.as_ref().ok().and_then(|r| r.duration)
    }

    pub fn to_colored_string(&self) -> String {
        let mut line = pad_dots(short_name(&self.name), 60).cyan().to_string();

        if let Some(duration) = self.duration() {
            line.push_str(
                &pad_dots(&format!(" {}ms ", duration.as_millis()), 10)
                    .magenta()
                    .to_string(),
            );
        }
        line.push_str(&self.action.to_colored_string());

        match &self.result {
            Err(err) => line.push_str(&format!(" ERROR!! {}", err).red().to_string()),
            Ok(StepReport {
                message: Some(message),
                ..
            }) => line.push_str(&format!(": {}", message.green())),
            Ok(_) => {}
        }
        line
    }
}

impl std::fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.action, self.name)?;
        if let Some(duration) = self.duration() {
            write!(f, " ({}ms)", duration.as_millis())?;
        }
        match &self.result {
            Err(err) => write!(f, " ERROR: {}", err),
            Ok(StepReport {
                message: Some(message),
                ..
            }) => write!(f, ": {}", message),
            Ok(_) => Ok(()),
        }
    }
}
