use crate::config::Settings;
use anyhow::{Context, Result};
use sea_orm::{Database, DatabaseConnection};

pub async fn init_db(settings: &Settings) -> Result<DatabaseConnection> {
    connect(&settings.database.url).await.context(format!(
        "Failed to connect to database '{}' (url is hidden)",
        settings.database.database_name()
    ))
}

pub async fn connect(url: &str) -> Result<DatabaseConnection> {
    Ok(Database::connect(url).await?)
}
