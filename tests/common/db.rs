use std::sync::Arc;

use anyhow::Result;
use rung::{
    migrator::{Migration, Migrator, Registry},
    services::MigrationService,
    types::{StepAction, StepOutcome},
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::common::{Behavior, CallLog, FakeMigration};

/// One pooled connection, so every clone sees the same in-memory database.
pub async fn memory_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Ok(Database::connect(options).await?)
}

pub struct Harness {
    pub service: MigrationService,
    pub db: DatabaseConnection,
    pub log: CallLog,
}

impl Harness {
    pub async fn new(migrations: &[(&str, Behavior)]) -> Result<Self> {
        let db = memory_db().await?;
        let log = CallLog::default();
        let units: Vec<Arc<dyn Migration>> = migrations
            .iter()
            .map(|(name, behavior)| {
                Arc::new(FakeMigration::new(name, *behavior, log.clone())) as Arc<dyn Migration>
            })
            .collect();

        let service = MigrationService::new(Migrator::new(Registry::new(units), db.clone()));
        service.ensure_history_table().await?;

        Ok(Self { service, db, log })
    }

    pub fn migrator(&self) -> &Migrator {
        self.service.migrator()
    }

    /// History names, oldest first.
    pub async fn applied(&self) -> Result<Vec<String>> {
        Ok(self
            .service
            .history()
            .await?
            .into_iter()
            .map(|row| row.name)
            .collect())
    }

    pub async fn latest(&self) -> Result<String> {
        self.service.latest_applied_name().await
    }
}

/// `(action, name)` of every outcome.
pub fn summary(outcomes: &[StepOutcome]) -> Vec<(StepAction, &str)> {
    outcomes
        .iter()
        .map(|o| (o.action, o.name.as_str()))
        .collect()
}

/// `(action, name)` of every outcome that is not a skip.
pub fn executed(outcomes: &[StepOutcome]) -> Vec<(StepAction, &str)> {
    outcomes
        .iter()
        .filter(|o| o.action != StepAction::Skip)
        .map(|o| (o.action, o.name.as_str()))
        .collect()
}
