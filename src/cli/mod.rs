mod commands;

use clap::Parser;
use colored::Colorize;

pub use crate::cli::commands::ExitOnErr;
use crate::cli::commands::{Commands, cmd_create, cmd_history, cmd_migrate, cmd_version};
use crate::config::Settings;
use crate::services::AppServices;

pub struct Context<'a> {
    pub settings: &'a Settings,
    pub services: &'a AppServices,
}

#[derive(Parser, Debug)]
#[command(
    name = "rung",
    about = "Apply and revert ordered database migrations",
    long_about = format!(
r#"{} - {}"#,
"RUNG".green().bold(),
"Step a database up and down an ordered list of migrations, tracked in a history table."
))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parses process arguments. Unknown commands exit with status 1.
    pub fn parse_args() -> Self {
        Self::try_parse().unwrap_or_else(|err| {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        })
    }

    pub async fn execute(&self, settings: &Settings) {
        match &self.command {
            Commands::Migrate(action) => {
                let services = init_services(settings).await;
                cmd_migrate::execute(action, &Context { settings, services: &services }).await
            }
            Commands::History(action) => {
                let services = init_services(settings).await;
                cmd_history::execute(action, &Context { settings, services: &services }).await
            }
            Commands::Create(args) => cmd_create::execute(args, settings).await,
            Commands::Version(action) => cmd_version::execute(action).await,
        }
    }
}

async fn init_services(settings: &Settings) -> AppServices {
    AppServices::new(settings)
        .await
        .exit_on_err("Failed to initialize services")
}
