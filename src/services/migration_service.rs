use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    entities::HistoryModel,
    errors::ResolveError,
    migrator::{Migrator, Registry},
    repo::HistoryRepository,
    types::{MigrationStatus, StepOutcome},
};

/// The named migration modes. Each reads the current version once, picks the
/// target from the registry, and hands both bounds to the [`Migrator`].
pub struct MigrationService {
    migrator: Migrator,
    history: Arc<HistoryRepository>,
}

impl MigrationService {
    pub fn new(migrator: Migrator) -> Self {
        let history = migrator.history();
        Self { migrator, history }
    }

    pub fn registry(&self) -> &Registry {
        self.migrator.registry()
    }

    pub fn migrator(&self) -> &Migrator {
        &self.migrator
    }

    pub async fn ensure_history_table(&self) -> Result<()> {
        self.history.ensure_table().await
    }

    /// Greatest applied name, or an empty string when nothing is applied.
    /// A migration applied later under a smaller name does not change it.
    pub async fn latest_applied_name(&self) -> Result<String> {
        Ok(self
            .history
            .find_latest()
            .await?
            .map(|row| row.name)
            .unwrap_or_default())
    }

    pub async fn history(&self) -> Result<Vec<HistoryModel>> {
        self.history.get_all().await
    }

    pub async fn status(&self) -> Result<MigrationStatus> {
        Ok(MigrationStatus {
            registered: self
                .registry()
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
            history: self.history().await?,
            current: self.latest_applied_name().await?,
        })
    }

    /// Applies the migration right after the current version.
    pub async fn up_one(&self) -> Result<Vec<StepOutcome>> {
        let from = self.latest_applied_name().await?;
        let next = if from.is_empty() {
            self.registry().first()
        } else {
            self.registry().find_after(&from)
        };

        let Some(next) = next else {
            return Ok(StepOutcome::nothing_to_run());
        };
        self.migrator.run_up_from_to(&from, next.name()).await
    }

    /// Reverts the current version.
    pub async fn down_one(&self) -> Result<Vec<StepOutcome>> {
        let from = self.latest_applied_name().await?;
        if from.is_empty() {
            return Ok(StepOutcome::nothing_to_run());
        }

        let to = self
            .registry()
            .find_before(&from)
            .map(|m| m.name().to_string())
            .unwrap_or_default();
        self.migrator.run_down_from_to(&from, &to).await
    }

    /// Applies everything up to the last registered migration.
    pub async fn install(&self) -> Result<Vec<StepOutcome>> {
        let from = self.latest_applied_name().await?;
        let to = self.registry().last().ok_or(ResolveError::EmptyRegistry)?;

        if from == to.name() {
            return Ok(StepOutcome::nothing_to_run());
        }
        self.migrator.run_up_from_to(&from, to.name()).await
    }

    /// Reverts everything down to the empty version.
    pub async fn uninstall(&self) -> Result<Vec<StepOutcome>> {
        let from = self.latest_applied_name().await?;
        if from.is_empty() {
            return Ok(StepOutcome::nothing_to_run());
        }
        self.migrator.run_down_from_to(&from, "").await
    }

    /// Uninstalls, then installs. When any revert fails only the uninstall
    /// outcomes are returned and nothing is applied.
    pub async fn reinstall(&self) -> Result<Vec<StepOutcome>> {
        let mut outcomes = self.uninstall().await?;

        let failures: Vec<&StepOutcome> = outcomes.iter().filter(|o| o.is_error()).collect();
        if !failures.is_empty() {
            warn!("Found errors in the uninstall, skipping the install.");
            for (i, failure) in failures.iter().enumerate() {
                warn!(" ERR [{}]: {}", i, failure);
            }
            return Ok(outcomes);
        }

        outcomes.extend(self.install().await?);
        Ok(outcomes)
    }

    /// Marks `name` as applied without running it.
    pub async fn insert_history(&self, name: &str) -> Result<()> {
        if self.registry().find_by_name(name).is_none() {
            return Err(ResolveError::UnknownMigration(name.to_string()).into());
        }
        info!("Insert history item for {}", name);
        self.history.insert(name).await
    }

    /// Forgets that `name` was applied, without reverting it.
    pub async fn delete_history(&self, name: &str) -> Result<u64> {
        info!("Removing history item for {}", name);
        self.history.delete(name).await
    }

    pub async fn clear_history(&self) -> Result<u64> {
        info!("Removing all history items");
        self.history.delete_all().await
    }
}
