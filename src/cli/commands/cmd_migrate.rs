use clap::{Args, Subcommand};
use colored::*;

use crate::cli::{
    Context,
    commands::{
        ExitOnErr,
        shared::{confirm_or_exit, print_current_version, print_overview, print_results},
    },
};

#[derive(Args, Debug, Clone)]
pub struct ConfirmArgs {
    /// Skip the confirmation prompts
    #[arg(short, long, default_value_t = false)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum MigrateCommands {
    /// Apply the next pending migration
    Up,

    /// Revert the current migration
    Down(ConfirmArgs),

    /// Apply every pending migration
    Install,

    /// Revert every applied migration
    Uninstall(ConfirmArgs),

    /// Revert every applied migration, then apply every registered one
    Reinstall(ConfirmArgs),

    /// Show registered migrations, history and current version
    Status,
}

pub async fn execute(action: &MigrateCommands, ctx: &Context<'_>) {
    print_overview(ctx).await;

    let service = &ctx.services.migration_service;
    let outcomes = match action {
        MigrateCommands::Up => {
            println!("Go up by one");
            service.up_one().await
        }
        MigrateCommands::Down(args) => {
            confirm_or_exit(ctx, args.yes, "Go back one version of the database?");
            println!("Go down by one");
            service.down_one().await
        }
        MigrateCommands::Install => {
            println!("Go up to latest");
            service.install().await
        }
        MigrateCommands::Uninstall(args) => {
            confirm_or_exit(
                ctx,
                args.yes,
                &format!("{} all data and tables?", "Destroy".red()),
            );
            println!("Run \"down\" for all migrations in history");
            service.uninstall().await
        }
        MigrateCommands::Reinstall(args) => {
            confirm_or_exit(
                ctx,
                args.yes,
                &format!("{} all data and tables (then rebuild)?", "Destroy".red()),
            );
            println!(
                "Run \"down\" for all migrations in history, then \"up\" for all registered migrations"
            );
            service.reinstall().await
        }
        MigrateCommands::Status => Ok(vec![]),
    }
    .exit_on_err("Migration run failed");

    print_results(&outcomes);
    print_current_version(ctx).await;
}
