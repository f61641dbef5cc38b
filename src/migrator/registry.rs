use std::{collections::HashSet, sync::Arc};

use crate::{
    errors::LoadError,
    migrator::{Migration, MigrationSource},
};

/// All known migrations in one ascending order by name.
///
/// The order is plain string comparison of names, never apply time.
#[derive(Default, Clone)]
pub struct Registry {
    migrations: Vec<Arc<dyn Migration>>,
}

impl Registry {
    pub fn new(migrations: Vec<Arc<dyn Migration>>) -> Self {
        let mut registry = Self::default();
        registry.register(migrations);
        registry
    }

    /// Loads every migration from `source`, rejecting duplicate names.
    pub fn load(source: &dyn MigrationSource) -> Result<Self, LoadError> {
        let migrations = source.load()?;

        let mut seen = HashSet::new();
        for migration in &migrations {
            if !seen.insert(migration.name()) {
                return Err(LoadError::DuplicateName(migration.name().to_string()));
            }
        }

        Ok(Self::new(migrations))
    }

    /// Replaces the working set. No deduplication happens here.
    pub fn register(&mut self, migrations: Vec<Arc<dyn Migration>>) {
        self.migrations = migrations;
        self.migrations.sort_by(|a, b| a.name().cmp(b.name()));
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Arc<dyn Migration>> {
        self.migrations.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.migrations.iter().map(|m| m.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    pub fn first(&self) -> Option<&Arc<dyn Migration>> {
        self.migrations.first()
    }

    pub fn last(&self) -> Option<&Arc<dyn Migration>> {
        self.migrations.last()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Arc<dyn Migration>> {
        self.migrations.iter().find(|m| m.name() == name)
    }

    /// Lowest-named migration strictly after `name`.
    pub fn find_after(&self, name: &str) -> Option<&Arc<dyn Migration>> {
        self.migrations.iter().find(|m| m.name() > name)
    }

    /// Migration right before the one named `name`. `None` when `name` is
    /// unknown or is the first migration.
    pub fn find_before(&self, name: &str) -> Option<&Arc<dyn Migration>> {
        let index = self.migrations.iter().position(|m| m.name() == name)?;
        index.checked_sub(1).map(|i| &self.migrations[i])
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
