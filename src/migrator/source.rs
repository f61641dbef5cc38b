use std::{path::PathBuf, sync::Arc};

use tracing::{debug, info};

use crate::{
    errors::LoadError,
    migrator::{Migration, SqlMigration},
};

/// Produces the migrations the registry is built from.
pub trait MigrationSource {
    fn load(&self) -> Result<Vec<Arc<dyn Migration>>, LoadError>;
}

/// Migrations registered in code.
impl MigrationSource for Vec<Arc<dyn Migration>> {
    fn load(&self) -> Result<Vec<Arc<dyn Migration>>, LoadError> {
        Ok(self.clone())
    }
}

/// Every `*.sql` file of a directory. Other files are ignored.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl MigrationSource for DirectorySource {
    fn load(&self) -> Result<Vec<Arc<dyn Migration>>, LoadError> {
        info!("Loading migration files from: {}", self.dir.display());

        let read_dir_err = |source| LoadError::ReadDir {
            path: self.dir.clone(),
            source,
        };

        let mut migrations: Vec<Arc<dyn Migration>> = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(read_dir_err)? {
            let path = entry.map_err(read_dir_err)?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "sql") {
                continue;
            }
            debug!("Loading migration from file: {}", path.display());
            migrations.push(Arc::new(SqlMigration::from_file(&path)?));
        }

        Ok(migrations)
    }
}
