use clap::Subcommand;

use crate::cli::{
    Context,
    commands::{ExitOnErr, shared::print_overview},
};

/// Edit the history table without running any migration.
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Mark a registered migration as applied
    InsertHistory {
        #[arg(required = true)]
        name: String,
    },

    /// Remove a migration from the history
    DeleteHistory {
        #[arg(required = true)]
        name: String,
    },

    /// Remove every row from the history
    ClearHistory,
}

pub async fn execute(action: &HistoryCommands, ctx: &Context<'_>) {
    print_overview(ctx).await;

    let service = &ctx.services.migration_service;
    match action {
        HistoryCommands::InsertHistory { name } => {
            service
                .insert_history(name)
                .await
                .exit_on_err(&format!("Failed to insert history item '{}'", name));
            println!("✅ Inserted history item for '{}'", name);
        }
        HistoryCommands::DeleteHistory { name } => {
            let count = service
                .delete_history(name)
                .await
                .exit_on_err(&format!("Failed to delete history item '{}'", name));
            if count == 0 {
                println!("✅ No history item found for '{}'", name);
            } else {
                println!("✅ Removed history item for '{}'", name);
            }
        }
        HistoryCommands::ClearHistory => {
            let count = service
                .clear_history()
                .await
                .exit_on_err("Failed to clear history");
            println!("✅ Removed {} history items", count);
        }
    }
}
