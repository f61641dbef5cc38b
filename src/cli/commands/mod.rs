pub mod cmd_create;
pub mod cmd_history;
pub mod cmd_migrate;
pub mod cmd_version;
pub mod shared;

use clap::Subcommand;

use crate::cli::commands::{
    cmd_create::CreateArgs, cmd_history::HistoryCommands, cmd_migrate::MigrateCommands,
    cmd_version::VersionCommand,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Migrate(MigrateCommands),

    #[command(flatten)]
    History(HistoryCommands),

    /// Create a new migration file in the migrations directory
    Create(CreateArgs),

    /// Print version
    Version(VersionCommand),
}

pub trait ExitOnErr<T> {
    fn exit_on_err(self, msg: &str) -> T;
}

impl<T, E: std::fmt::Display> ExitOnErr<T> for Result<T, E> {
    fn exit_on_err(self, msg: &str) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("❌ {}: {:#}", msg, e);
                std::process::exit(1);
            }
        }
    }
}
