pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod manifest;

pub use config::Config;
pub use error::PhotosetDlError;
