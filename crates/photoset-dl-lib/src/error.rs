use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotosetDlError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid command-line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Invalid manifest source: {details}")]
    ManifestSource { details: String },

    #[error("Manifest error: {0}")]
    Manifest(#[from] crate::manifest::ManifestError),

    #[error("Download error: {0}")]
    Download(#[from] crate::download::DownloadError),

    #[error("Output directory creation failed at {path}: {reason}")]
    OutputDirectoryCreation { path: PathBuf, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}

/// Renders an error and its sources on one line, outermost first.
pub fn error_chain_message<E>(error: E) -> String
where
    E: std::error::Error + Send + Sync + 'static,
{
    format!("{:#}", eyre::Report::new(error))
}
