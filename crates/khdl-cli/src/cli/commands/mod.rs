//! CLI command handlers.

mod config;
mod download;
mod input;

pub use config::show_config;
pub use download::run_download;
