mod db;

pub use db::{connect, init_db};
