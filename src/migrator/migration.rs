use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::{errors::LoadError, types::StepReport};

pub const UP_MARKER: &str = "-- rung:up";
pub const DOWN_MARKER: &str = "-- rung:down";

/// A named, reversible change.
///
/// Names order the registry lexicographically, so they should start with a
/// `YYYY-MM-DD-HH-mm-ss` timestamp to keep creation order and name order equal.
/// `up` and `down` report failures through their `Err`; the engine records
/// the error and stops the run.
#[async_trait]
pub trait Migration: Send + Sync {
    fn name(&self) -> &str;

    async fn up(&self, db: &DatabaseConnection) -> Result<StepReport>;

    async fn down(&self, db: &DatabaseConnection) -> Result<StepReport>;
}

#[derive(Debug, Default)]
struct Section {
    seen: bool,
    message: Option<String>,
    lines: Vec<String>,
}

impl Section {
    fn open(&mut self, message: &str) {
        self.seen = true;
        if !message.is_empty() {
            self.message = Some(message.to_string());
        }
    }

    fn sql(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

/// Matches `-- rung:up` but not `-- rung:update`; returns the trailing message.
fn marker_message<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.trim().strip_prefix(marker)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Migration read from a `.sql` file with `-- rung:up` and `-- rung:down` sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlMigration {
    name: String,
    up_sql: String,
    up_message: Option<String>,
    down_sql: String,
    down_message: Option<String>,
}

impl SqlMigration {
    pub fn parse(name: &str, path: &Path, content: &str) -> Result<Self, LoadError> {
        let mut up = Section::default();
        let mut down = Section::default();
        let mut current: Option<bool> = None;

        // Some editors prefix files with a byte-order mark.
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        for line in content.lines() {
            if let Some(message) = marker_message(line, UP_MARKER) {
                up.open(message);
                current = Some(true);
            } else if let Some(message) = marker_message(line, DOWN_MARKER) {
                down.open(message);
                current = Some(false);
            } else {
                match current {
                    Some(true) => up.lines.push(line.to_string()),
                    Some(false) => down.lines.push(line.to_string()),
                    None => {}
                }
            }
        }

        if !up.seen {
            return Err(LoadError::MissingUp {
                name: name.to_string(),
                path: path.to_path_buf(),
            });
        }
        if !down.seen {
            return Err(LoadError::MissingDown {
                name: name.to_string(),
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            up_sql: up.sql(),
            up_message: up.message,
            down_sql: down.sql(),
            down_message: down.message,
        })
    }

    /// The file stem becomes the migration name.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::parse(&name, path, &content)
    }

    pub fn up_sql(&self) -> &str {
        &self.up_sql
    }

    pub fn down_sql(&self) -> &str {
        &self.down_sql
    }

    async fn execute(
        &self,
        db: &DatabaseConnection,
        sql: &str,
        message: &Option<String>,
    ) -> Result<StepReport> {
        if !sql.is_empty() {
            db.execute_unprepared(sql).await?;
        }
        Ok(StepReport {
            message: message.clone(),
            duration: None,
        })
    }
}

#[async_trait]
impl Migration for SqlMigration {
    fn name(&self) -> &str {
        &self.name
    }

    async fn up(&self, db: &DatabaseConnection) -> Result<StepReport> {
        self.execute(db, &self.up_sql, &self.up_message).await
    }

    async fn down(&self, db: &DatabaseConnection) -> Result<StepReport> {
        self.execute(db, &self.down_sql, &self.down_message).await
    }
}
