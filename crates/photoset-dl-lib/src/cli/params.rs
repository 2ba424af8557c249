use crate::download::DownloadOptions;
use url::Url;

#[derive(Debug, Clone)]
pub struct PhotosetParams {
    pub endpoint: Url,
    pub options: DownloadOptions,
}

#[derive(Debug, Clone)]
pub struct GetParams {
    pub urls: Vec<String>,
    pub options: DownloadOptions,
}
