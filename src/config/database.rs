use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Name the user must type to confirm destructive commands.
    #[serde(default)]
    pub name: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            name: None,
        }
    }
}

fn default_url() -> String {
    "sqlite://rung.db?mode=rwc".to_string()
}

impl DatabaseConfig {
    /// The configured name, or the last path segment of the url
    /// (`postgres://host/app` -> `app`, `sqlite://data/app.db?mode=rwc` -> `app`).
    pub fn database_name(&self) -> String {
        if let Some(name) = self.name.as_ref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }

        let without_query = self.url.split(['?', '#']).next().unwrap_or_default();
        let path = without_query
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(without_query);

        path.rsplit('/')
            .find(|segment| !segment.is_empty())
            .and_then(|segment| Path::new(segment).file_stem())
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| self.url.clone())
    }
}
