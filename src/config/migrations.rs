use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MigrationsConfig {
    #[serde(default = "default_dir")]
    pub dir: String,

    #[serde(default)]
    pub skip_confirmations: bool,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            skip_confirmations: false,
        }
    }
}

fn default_dir() -> String {
    "./migrations".to_string()
}
