use colored::*;
use inquire::{Confirm, Text};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::{
    cli::{Context, commands::ExitOnErr},
    types::{MigrationStatus, StepOutcome},
};

#[derive(Tabled)]
struct MigrationRow {
    #[tabled(rename = "#")]
    index: String,

    #[tabled(rename = "Migration")]
    name: String,

    #[tabled(rename = "Applied At")]
    applied_at: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string()
}

/// Prints the registered migrations and the applied history.
pub async fn print_overview(ctx: &Context<'_>) {
    let status = ctx
        .services
        .migration_service
        .status()
        .await
        .exit_on_err("Failed to read migration status");

    println!("{}", "=== Registered Migrations ===".blue());
    if status.registered.is_empty() {
        println!(
            "No migration files found in {}",
            ctx.settings.migrations.dir.bright_black()
        );
    } else {
        let rows = status
            .registered
            .iter()
            .enumerate()
            .map(|(i, name)| MigrationRow {
                index: (i + 1).to_string().bright_black().to_string(),
                name: name.cyan().to_string(),
                applied_at: status
                    .applied_at(name)
                    .map(|row| row.date.to_string().green().to_string())
                    .unwrap_or_else(|| "pending".yellow().to_string()),
            })
            .collect::<Vec<_>>();
        println!("{}", render(rows));

        let pending = status.pending();
        if !pending.is_empty() {
            println!("{} pending: {}", pending.len(), pending.join(", ").yellow());
        }
    }

    print_history(&status);
}

fn print_history(status: &MigrationStatus) {
    println!("{}", "=== Migration History ===".blue());
    if status.history.is_empty() {
        println!("{}", status);
        return;
    }

    let rows = status
        .history
        .iter()
        .enumerate()
        .map(|(i, row)| MigrationRow {
            index: (i + 1).to_string().bright_black().to_string(),
            name: row.name.cyan().to_string(),
            applied_at: row.date.to_string(),
        })
        .collect::<Vec<_>>();
    println!("{}", render(rows));

    for row in status.unregistered() {
        println!(
            "⚠️ '{}' is in history but has no migration file",
            row.name.yellow()
        );
    }
}

pub fn print_results(outcomes: &[StepOutcome]) {
    if outcomes.is_empty() {
        return;
    }
    println!("__________________");
    println!(
        "{} result{}:",
        outcomes.len(),
        if outcomes.len() == 1 { "" } else { "s" }
    );
    for outcome in outcomes {
        println!("{}", outcome.to_colored_string());
    }
}

pub async fn print_current_version(ctx: &Context<'_>) {
    let latest = ctx
        .services
        .migration_service
        .latest_applied_name()
        .await
        .exit_on_err("Failed to read current version");

    let latest = if latest.is_empty() { "n/a".to_string() } else { latest };
    println!("Current version: {}", latest.black().on_white());
}

/// Makes the user type the database name, then confirm `question`.
/// Exits with status 1 when either step fails.
pub fn confirm_or_exit(ctx: &Context<'_>, yes: bool, question: &str) {
    if yes || ctx.settings.migrations.skip_confirmations {
        return;
    }

    let database_name = ctx.settings.database.database_name();
    let typed = Text::new(&format!(
        "Type the database name \"{}\" to continue:",
        database_name
    ))
    .prompt()
    .unwrap_or_default();

    if typed.trim() != database_name {
        println!("Confirmation failed.");
        std::process::exit(1);
    }

    let proceed = Confirm::new(question)
        .with_default(false)
        .prompt()
        .unwrap_or(false);
    if !proceed {
        println!("Confirmation failed.");
        std::process::exit(1);
    }
}
