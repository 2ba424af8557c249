mod args;
mod commands;
mod get;
mod params;
mod photoset;
mod resolved_command;

pub use args::{Args, Command, DownloadArgs, parse_args};
pub use commands::download_urls;
pub use get::run_get;
pub use params::{GetParams, PhotosetParams};
pub use photoset::run_photoset;
pub use resolved_command::{ResolvedCommand, resolve_command};
