use crate::cli::args::{Command, DownloadArgs};
use crate::cli::params::{GetParams, PhotosetParams};
use crate::config::{Config, ManifestSource, load_config};
use crate::download::{DEFAULT_USER_AGENT, DownloadOptions};
use crate::error::PhotosetDlError;
use crate::manifest::manifest_endpoint;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Photoset(PhotosetParams),
    Get(GetParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, PhotosetDlError> {
    match command {
        Command::Photoset {
            download,
            endpoint,
            api_key,
            photoset_id,
            user_id,
        } => {
            let app_config = load_optional_config(download.config_path.as_deref())?;
            let options = resolve_download_options(&download, &app_config)?;
            let source = resolve_manifest_source(
                app_config.manifest,
                endpoint,
                api_key,
                photoset_id,
                user_id,
            )?;

            Ok(ResolvedCommand::Photoset(PhotosetParams {
                endpoint: manifest_endpoint(&source)?,
                options,
            }))
        }
        Command::Get { download, urls } => {
            let app_config = load_optional_config(download.config_path.as_deref())?;
            let options = resolve_download_options(&download, &app_config)?;

            Ok(ResolvedCommand::Get(GetParams { urls, options }))
        }
    }
}

fn load_optional_config(config_path: Option<&str>) -> Result<Config, PhotosetDlError> {
    match config_path {
        Some(config_path) => {
            tracing::info!("Loading configuration from {}", config_path);
            load_config(config_path)
        }
        None => Ok(Config::default()),
    }
}

fn resolve_download_options(
    download: &DownloadArgs,
    app_config: &Config,
) -> Result<DownloadOptions, PhotosetDlError> {
    let timeout_secs = download.timeout_secs.or(app_config.http.timeout_secs);
    if timeout_secs == Some(0) {
        return Err(PhotosetDlError::CliArgumentValidation {
            details: "timeout must be greater than 0.".to_string(),
        });
    }

    let output_dir = download
        .output_dir
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| app_config.output.path.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(DownloadOptions {
        output_dir,
        request_timeout: timeout_secs.map(Duration::from_secs),
        user_agent: app_config
            .http
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
    })
}

/// Command-line flags take precedence over the configured source, field by field
/// for a Flickr photo set.
fn resolve_manifest_source(
    configured: Option<ManifestSource>,
    endpoint: Option<String>,
    api_key: Option<String>,
    photoset_id: Option<String>,
    user_id: Option<String>,
) -> Result<ManifestSource, PhotosetDlError> {
    if let Some(endpoint) = endpoint {
        return Ok(ManifestSource::Endpoint { endpoint });
    }

    let no_flickr_flags = api_key.is_none() && photoset_id.is_none() && user_id.is_none();
    let (configured_api_key, configured_photoset_id, configured_user_id, api_base) =
        match configured {
            Some(ManifestSource::Endpoint { endpoint }) if no_flickr_flags => {
                return Ok(ManifestSource::Endpoint { endpoint });
            }
            Some(ManifestSource::FlickrPhotoset {
                api_key,
                photoset_id,
                user_id,
                api_base,
            }) => (Some(api_key), Some(photoset_id), user_id, api_base),
            _ => (None, None, None, None),
        };

    match (api_key.or(configured_api_key), photoset_id.or(configured_photoset_id)) {
        (Some(api_key), Some(photoset_id)) => Ok(ManifestSource::FlickrPhotoset {
            api_key,
            photoset_id,
            user_id: user_id.or(configured_user_id),
            api_base,
        }),
        (None, None) => Err(PhotosetDlError::CliArgumentValidation {
            details: "No manifest source provided. Pass --endpoint, or --api-key with --photoset-id, or configure manifest in the config file.".to_string(),
        }),
        (None, Some(_)) => Err(PhotosetDlError::CliArgumentValidation {
            details: "No Flickr API key provided. Pass --api-key or set manifest.api_key."
                .to_string(),
        }),
        (Some(_), None) => Err(PhotosetDlError::CliArgumentValidation {
            details: "No photo set id provided. Pass --photoset-id or set manifest.photoset_id."
                .to_string(),
        }),
    }
}
