pub mod database;
pub mod log;
pub mod migrations;
pub mod settings;

pub use database::DatabaseConfig;
pub use log::LogConfig;
pub use migrations::MigrationsConfig;
pub use settings::Settings;
