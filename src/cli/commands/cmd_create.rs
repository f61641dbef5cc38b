use std::path::Path;

use chrono::Utc;
use clap::Args;
use colored::*;

use crate::{cli::commands::ExitOnErr, config::Settings, utils::create_migration_file};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Words of the migration name, joined with dashes
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
}

pub async fn execute(args: &CreateArgs, settings: &Settings) {
    let path = create_migration_file(Path::new(&settings.migrations.dir), &args.name, Utc::now())
        .exit_on_err("Failed to create migration file");

    println!("✅ Created new migration file: {}", path.display().to_string().green());
    println!("You need to fill in its up and down sections");
}
