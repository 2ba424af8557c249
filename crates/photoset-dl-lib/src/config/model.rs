use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

pub const DEFAULT_FLICKR_API_BASE: &str = "https://api.flickr.com/services/rest/";

/// Where the photo set manifest is fetched from.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, untagged)]
pub enum ManifestSource {
    /// A fully-formed request URL, query included.
    Endpoint { endpoint: String },
    /// A Flickr photo set, rendered into a `flickr.photosets.getPhotos` call.
    FlickrPhotoset {
        api_key: String,
        #[serde(deserialize_with = "id_from_string_or_number")]
        photoset_id: String,
        #[serde(
            default,
            deserialize_with = "optional_id_from_string_or_number",
            skip_serializing_if = "Option::is_none"
        )]
        user_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_base: Option<String>,
    },
}

/// Flickr ids are numeric, so config files often leave them unquoted.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlickrId {
    Text(String),
    Number(u64),
}

impl From<FlickrId> for String {
    fn from(id: FlickrId) -> Self {
        match id {
            FlickrId::Text(text) => text,
            FlickrId::Number(number) => number.to_string(),
        }
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    FlickrId::deserialize(deserializer).map(String::from)
}

fn optional_id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<FlickrId>::deserialize(deserializer).map(|id| id.map(String::from))
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub manifest: Option<ManifestSource>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory downloads are written to. Defaults to the working directory.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Per-request timeout. Unset means transfers may take arbitrarily long.
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}
