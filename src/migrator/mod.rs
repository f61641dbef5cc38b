//! Migration engine: units, their ordering, and the directional runs that
//! apply or revert them against the history table.

mod migration;
mod registry;
mod runner;
mod source;

pub use migration::{DOWN_MARKER, Migration, SqlMigration, UP_MARKER};
pub use registry::Registry;
pub use runner::Migrator;
pub use source::{DirectorySource, MigrationSource};
