use std::{sync::Arc, time::Instant};

use anyhow::Result;
use sea_orm::DatabaseConnection;
use tracing::{error, info};

use crate::{
    errors::StepError,
    migrator::{Migration, Registry},
    repo::HistoryRepository,
    types::{StepAction, StepOutcome, StepReport},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl Direction {
    fn action(self) -> StepAction {
        match self {
            Direction::Up => StepAction::Apply,
            Direction::Down => StepAction::Revert,
        }
    }

    /// Up runs `from < name <= to`, down runs `to < name <= from`.
    /// The empty string sorts before every name.
    fn should_run(self, name: &str, from: &str, to: &str) -> bool {
        match self {
            Direction::Up => name > from && name <= to,
            Direction::Down => name > to && name <= from,
        }
    }
}

/// Walks the registry between two names, applying or reverting each
/// migration in range and recording it in the history table.
///
/// A failing step ends the walk: its outcome carries the error and the
/// migrations after it are neither run nor listed. Errors from the history
/// table itself are returned as `Err`.
pub struct Migrator {
    registry: Registry,
    history: Arc<HistoryRepository>,
    db: DatabaseConnection,
}

impl Migrator {
    pub fn new(registry: Registry, db: DatabaseConnection) -> Self {
        Self {
            registry,
            history: Arc::new(HistoryRepository::new(db.clone())),
            db,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn history(&self) -> Arc<HistoryRepository> {
        self.history.clone()
    }

    pub async fn run_up_from_to(&self, from: &str, to: &str) -> Result<Vec<StepOutcome>> {
        self.run(Direction::Up, from, to).await
    }

    pub async fn run_down_from_to(&self, from: &str, to: &str) -> Result<Vec<StepOutcome>> {
        self.run(Direction::Down, from, to).await
    }

    async fn run(&self, direction: Direction, from: &str, to: &str) -> Result<Vec<StepOutcome>> {
        let migrations: Box<dyn Iterator<Item = &Arc<dyn Migration>> + '_> = match direction {
            Direction::Up => Box::new(self.registry.iter()),
            Direction::Down => Box::new(self.registry.iter().rev()),
        };

        let action = direction.action();
        let mut outcomes = Vec::with_capacity(self.registry.len());

        for migration in migrations {
            let name = migration.name();
            if !direction.should_run(name, from, to) {
                outcomes.push(StepOutcome::skipped(name));
                continue;
            }

            match self.run_timed(migration.as_ref(), direction).await {
                Ok(report) => {
                    match direction {
                        Direction::Up => self.history.insert(name).await?,
                        Direction::Down => {
                            self.history.delete(name).await?;
                        }
                    }
                    outcomes.push(StepOutcome::completed(name, action, report));
                }
                Err(err) => {
                    error!("Failed to {} {}: {}", action, name, err);
                    outcomes.push(StepOutcome::failed(name, action, err));
                    break;
                }
            }
        }

        Ok(outcomes)
    }

    async fn run_timed(
        &self,
        migration: &dyn Migration,
        direction: Direction,
    ) -> Result<StepReport, StepError> {
        info!("Running {} ({})", migration.name(), direction.action());
        let started = Instant::now();

        let mut report = match direction {
            Direction::Up => migration.up(&self.db).await?,
            Direction::Down => migration.down(&self.db).await?,
        };
        let elapsed = started.elapsed();

        info!("Finished {} in {}ms", migration.name(), elapsed.as_millis());
        report.duration = Some(elapsed);
        Ok(report)
    }
}
