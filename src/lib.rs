pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod migrator;
pub mod repo;
pub mod services;
pub mod types;
pub mod utils;
