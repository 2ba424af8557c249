mod loader;
mod model;

pub use loader::load_config;
pub use model::{Config, DEFAULT_FLICKR_API_BASE, HttpConfig, ManifestSource, OutputConfig};
