pub mod db;

pub use db::{Harness, executed, memory_db, summary};
pub use fakes::{Behavior, CallLog, FakeMigration};
