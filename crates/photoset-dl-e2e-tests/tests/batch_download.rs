use photoset_dl_e2e_tests::{
    MANIFEST_PATH, PHOTOS, REDIRECTED_PHOTO_PATH, requests_to, setup_test_environment,
    start_gallery_server,
};
use photoset_dl_lib::cli::{
    Command, DownloadArgs, GetParams, PhotosetParams, ResolvedCommand, resolve_command, run_get,
    run_photoset,
};
use photoset_dl_lib::download::{DownloadOutcome, FailureReason};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn build_photoset_params(config_path: &Path) -> PhotosetParams {
    let command = Command::Photoset {
        download: DownloadArgs {
            config_path: Some(config_path.to_str().unwrap().to_string()),
            ..DownloadArgs::default()
        },
        endpoint: None,
        api_key: None,
        photoset_id: None,
        user_id: None,
    };
    match resolve_command(command).expect("Failed to resolve photoset command") {
        ResolvedCommand::Photoset(params) => params,
        _ => unreachable!("Resolved command type mismatch"),
    }
}

fn build_get_params(config_path: &Path, urls: Vec<String>) -> GetParams {
    let command = Command::Get {
        download: DownloadArgs {
            config_path: Some(config_path.to_str().unwrap().to_string()),
            ..DownloadArgs::default()
        },
        urls,
    };
    match resolve_command(command).expect("Failed to resolve get command") {
        ResolvedCommand::Get(params) => params,
        _ => unreachable!("Resolved command type mismatch"),
    }
}

fn read(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.as_ref().display(), e))
}

#[tokio::test]
async fn test_photoset_end_to_end() {
    init_tracing();

    let server = start_gallery_server().await;
    let temp_dir = setup_test_environment(&server.uri()).expect("Failed to setup test environment");
    let downloads = temp_dir.path().join("downloads");

    let params = build_photoset_params(&temp_dir.path().join("config.json"));
    let result = run_photoset(params).await.expect("Photoset run should succeed");

    // Four manifest entries carry a url_o; the private photo is skipped.
    assert_eq!(result.dispatched(), 4);
    assert!(result.is_complete());

    let summary = result.summary();
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.redirected, 1);
    assert_eq!(summary.failed, 0);

    assert_eq!(read(downloads.join("1_o.jpg")), PHOTOS[0].1);
    assert_eq!(read(downloads.join("2_o.jpg")), PHOTOS[1].1);
    assert_eq!(
        read(downloads.join("1_o.jpg.0")),
        PHOTOS[2].1,
        "Second photo named 1_o.jpg should get the next free suffix"
    );
    assert!(!downloads.join("moved_o.jpg").exists());

    let records = result.into_input_order();
    assert_eq!(records[3].request.url, format!("{}{}", server.uri(), REDIRECTED_PHOTO_PATH));
    assert_eq!(records[3].outcome, DownloadOutcome::Redirected);

    assert_eq!(requests_to(&server, MANIFEST_PATH).await, 1);
    // The redirect is reported, not followed.
    assert_eq!(requests_to(&server, PHOTOS[0].0).await, 1);
}

#[tokio::test]
async fn test_photoset_keeps_previous_downloads() {
    init_tracing();

    let server = start_gallery_server().await;
    let temp_dir = setup_test_environment(&server.uri()).expect("Failed to setup test environment");
    let downloads = temp_dir.path().join("downloads");
    std::fs::create_dir_all(&downloads).unwrap();
    std::fs::write(downloads.join("2_o.jpg"), "from an earlier run").unwrap();

    let params = build_photoset_params(&temp_dir.path().join("config.json"));
    let result = run_photoset(params).await.expect("Photoset run should succeed");

    assert_eq!(result.summary().succeeded, 3);
    assert_eq!(read(downloads.join("2_o.jpg")), "from an earlier run");
    assert_eq!(read(downloads.join("2_o.jpg.0")), PHOTOS[1].1);
}

#[tokio::test]
async fn test_photoset_manifest_failure_downloads_nothing() {
    init_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MANIFEST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let temp_dir = setup_test_environment(&server.uri()).expect("Failed to setup test environment");

    let params = build_photoset_params(&temp_dir.path().join("config.json"));
    let result = run_photoset(params)
        .await
        .expect("Manifest failure should not fail the run");

    assert!(result.is_empty());
    assert!(result.is_complete());
    assert!(!temp_dir.path().join("downloads").exists());
}

#[tokio::test]
async fn test_photoset_unexpected_manifest_shape_downloads_nothing() {
    init_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MANIFEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "stat": "fail",
            "code": 1,
            "message": "Photoset not found",
        })))
        .mount(&server)
        .await;
    let temp_dir = setup_test_environment(&server.uri()).expect("Failed to setup test environment");

    let params = build_photoset_params(&temp_dir.path().join("config.json"));
    let result = run_photoset(params).await.expect("Photoset run should succeed");

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_get_downloads_only_given_urls() {
    init_tracing();

    let server = start_gallery_server().await;
    let temp_dir = setup_test_environment(&server.uri()).expect("Failed to setup test environment");
    let downloads = temp_dir.path().join("downloads");

    let params = build_get_params(
        &temp_dir.path().join("config.json"),
        vec![
            format!("{}{}", server.uri(), PHOTOS[1].0),
            format!("{}/photos/unknown.jpg", server.uri()),
        ],
    );
    let result = run_get(params).await.expect("Get run should succeed");

    assert_eq!(result.len(), 2);
    let records = result.into_input_order();
    assert_eq!(
        records[0].outcome,
        DownloadOutcome::Succeeded(downloads.join("2_o.jpg"))
    );
    assert_eq!(
        records[1].outcome,
        DownloadOutcome::Failed(FailureReason::HttpStatus(404))
    );
    assert_eq!(read(downloads.join("2_o.jpg")), PHOTOS[1].1);
    assert!(!downloads.join("unknown.jpg").exists());

    assert_eq!(
        requests_to(&server, MANIFEST_PATH).await,
        0,
        "URLs on the command line replace the manifest"
    );
}

#[tokio::test]
async fn test_get_without_urls_downloads_nothing() {
    init_tracing();

    let server = start_gallery_server().await;
    let temp_dir = setup_test_environment(&server.uri()).expect("Failed to setup test environment");

    let params = build_get_params(&temp_dir.path().join("config.json"), vec![]);
    let result = run_get(params).await.expect("Get run should succeed");

    assert!(result.is_empty());
    assert!(!temp_dir.path().join("downloads").exists());
    assert!(
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .is_empty()
    );
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("photoset_dl_lib=debug,photoset_dl_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
