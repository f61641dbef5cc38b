use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DEFAULT_EXT_TARGET: &str = "sqlx";
const DEFAULT_EXT_LEVEL: &str = "error";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default = "default_console_format")]
    pub console_format: String,

    #[serde(default)]
    pub file_enabled: bool,

    /// Per-target overrides, given as `"target:level, target:level"`.
    #[serde(
        default = "default_ext_level",
        deserialize_with = "deserialize_ext_level"
    )]
    pub ext_level: BTreeMap<String, String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: Some("./logs".to_string()),
            console_format: default_console_format(),
            file_enabled: false,
            ext_level: default_ext_level(),
        }
    }
}

impl LogConfig {
    /// `EnvFilter` directive string: the base level followed by every target override.
    pub fn filter_directives(&self) -> String {
        let mut directives = self.level.clone();
        for (target, level) in &self.ext_level {
            directives.push_str(&format!(",{}={}", target, level));
        }
        directives
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_console_format() -> String {
    "pretty".to_string()
}

fn default_ext_level() -> BTreeMap<String, String> {
    BTreeMap::from([(DEFAULT_EXT_TARGET.to_string(), DEFAULT_EXT_LEVEL.to_string())])
}

/// Parses `"target:level, ..."`, skipping entries without a colon.
/// `sqlx:error` is always present unless the input overrides it.
pub fn parse_ext_levels(raw: &str) -> BTreeMap<String, String> {
    let mut levels = default_ext_level();
    for pair in raw.split(',') {
        if let Some((target, level)) = pair.trim().split_once(':') {
            levels.insert(target.trim().to_string(), level.trim().to_string());
        }
    }
    levels
}

fn deserialize_ext_level<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(parse_ext_levels(raw.as_deref().unwrap_or_default()))
}
