use eyre::Result;
use photoset_dl_lib::config::{Config, HttpConfig, ManifestSource, OutputConfig};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MANIFEST_PATH: &str = "/services/rest/";

/// Photos served by the gallery server, as (path, body).
pub const PHOTOS: [(&str, &str); 3] = [
    ("/photos/1_o.jpg", "first photo"),
    ("/photos/2_o.jpg", "second photo"),
    ("/other/1_o.jpg", "third photo, same name as the first"),
];

pub const REDIRECTED_PHOTO_PATH: &str = "/photos/moved_o.jpg";

/// Starts a server with the photos, a redirecting photo and a manifest listing
/// all of them in order (plus one entry without `url_o`).
pub async fn start_gallery_server() -> MockServer {
    let server = MockServer::start().await;

    for (photo_path, body) in PHOTOS {
        Mock::given(method("GET"))
            .and(path(photo_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(REDIRECTED_PHOTO_PATH))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", PHOTOS[0].0))
        .mount(&server)
        .await;

    let uri = server.uri();
    let manifest = serde_json::json!({
        "photoset": {
            "id": "72157",
            "photo": [
                { "id": "1", "url_o": format!("{uri}{}", PHOTOS[0].0) },
                { "id": "private" },
                { "id": "2", "url_o": format!("{uri}{}", PHOTOS[1].0) },
                { "id": "3", "url_o": format!("{uri}{}", PHOTOS[2].0) },
                { "id": "4", "url_o": format!("{uri}{REDIRECTED_PHOTO_PATH}") },
            ],
        },
        "stat": "ok",
    });
    Mock::given(method("GET"))
        .and(path(MANIFEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(manifest))
        .mount(&server)
        .await;

    server
}

pub fn create_test_config(server_uri: &str, output_dir: &Path) -> Config {
    Config {
        manifest: Some(ManifestSource::FlickrPhotoset {
            api_key: "test-key".to_string(),
            photoset_id: "72157".to_string(),
            user_id: Some("119669237@N03".to_string()),
            api_base: Some(format!("{server_uri}{MANIFEST_PATH}")),
        }),
        output: OutputConfig {
            path: Some(output_dir.to_path_buf()),
        },
        http: HttpConfig {
            timeout_secs: Some(10),
            user_agent: None,
        },
    }
}

/// Creates a temporary directory holding `config.json`, which points at
/// `server_uri` and saves into `downloads/` inside the directory.
pub fn setup_test_environment(server_uri: &str) -> Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;

    let config = create_test_config(server_uri, &temp_dir.path().join("downloads"));
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    Ok(temp_dir)
}

/// Number of requests the server received for `request_path`.
pub async fn requests_to(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}
