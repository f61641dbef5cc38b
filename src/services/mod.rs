pub mod migration_service;

use anyhow::{Context, Result};
use std::path::Path;

pub use migration_service::MigrationService;

use crate::{
    config::Settings,
    db::init_db,
    migrator::{DirectorySource, Migrator, Registry},
};

pub struct AppServices {
    pub migration_service: MigrationService,
}

impl AppServices {
    pub async fn new(settings: &Settings) -> Result<Self> {
        let source = DirectorySource::new(Path::new(&settings.migrations.dir));
        let registry = Registry::load(&source).context("Failed to load migrations")?;

        let db = init_db(settings).await?;
        let migration_service = MigrationService::new(Migrator::new(registry, db));
        migration_service
            .ensure_history_table()
            .await
            .context("Failed to initialize migrations history")?;

        Ok(Self { migration_service })
    }
}
