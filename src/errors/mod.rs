use std::path::PathBuf;

use thiserror::Error;

/// Raised while building the registry, before any database interaction.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read migrations directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read migration file '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No \"up\" step found for migration '{name}' ({})", path.display())]
    MissingUp { name: String, path: PathBuf },

    #[error("No \"down\" step found for migration '{name}' ({})", path.display())]
    MissingDown { name: String, path: PathBuf },

    #[error("Migration name '{0}' is registered more than once")]
    DuplicateName(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Could not find the last registered migration")]
    EmptyRegistry,

    #[error(
        "Cannot find a registered migration with name '{0}'. Check the name, and check the migrations directory"
    )]
    UnknownMigration(String),
}

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Migration name must not be empty")]
    EmptyName,

    #[error("Migration file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

/// Failure of a single migration step. Kept as data inside a `StepOutcome`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StepError {
    pub message: String,
}

impl StepError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for StepError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(format!("{:#}", err))
    }
}
