pub mod format;
pub mod logger;
pub mod scaffold;

pub use format::{NAME_TIMESTAMP_FORMAT, pad_dots, short_name};
pub use scaffold::create_migration_file;
