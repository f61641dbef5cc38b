use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use rust_embed::RustEmbed;
use tera::{Context, Tera};
use tracing::info;

use crate::{errors::ScaffoldError, utils::NAME_TIMESTAMP_FORMAT};

#[derive(RustEmbed)]
#[folder = "src/assets/templates/"]
struct Templates;

const MIGRATION_TEMPLATE: &str = "migration.sql.jinja";

/// `["Add", "users  table"]` -> `add-users-table`
pub fn slugify(name_parts: &[String]) -> String {
    name_parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn migration_file_name(slug: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}.sql", now.format(NAME_TIMESTAMP_FORMAT), slug)
}

fn render_migration(slug: &str, now: DateTime<Utc>) -> Result<String> {
    let file = Templates::get(MIGRATION_TEMPLATE)
        .ok_or_else(|| anyhow::anyhow!("Failed to find template: {}", MIGRATION_TEMPLATE))?;
    let template_str =
        std::str::from_utf8(file.data.as_ref()).context("Failed to parse template as UTF-8")?;

    let mut context = Context::new();
    context.insert("slug", slug);
    context.insert("created_at", &now.to_rfc3339());

    Tera::default()
        .render_str(template_str, &context)
        .context("Failed to render migration template")
}

/// Writes a new, empty migration into `dir` and returns its path.
pub fn create_migration_file(
    dir: &Path,
    name_parts: &[String],
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let slug = slugify(name_parts);
    if slug.is_empty() {
        return Err(ScaffoldError::EmptyName.into());
    }

    let path = dir.join(migration_file_name(&slug, now));
    if path.exists() {
        return Err(ScaffoldError::AlreadyExists(path).into());
    }

    let content = render_migration(&slug, now)?;
    std::fs::create_dir_all(dir).context(format!("Failed to create {}", dir.display()))?;
    std::fs::write(&path, content).context(format!("Failed to write {}", path.display()))?;

    info!("Created migration file {}", path.display());
    Ok(path)
}
