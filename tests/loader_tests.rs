// Integration tests for catalog loaders
//
// Tests cover:
// - HTTP loader against a mock server (success, status errors, bad bodies)
// - JSON file loader reading from disk
// - Record store construction through a loader

use std::time::Duration;

use model_catalog::models::LicenseStatus;
use model_catalog::storage::{HttpLoader, JsonFileLoader, LoadError, RecordLoader, RecordStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOG_JSON: &str = r#"{
    "models": [
        {
            "name": "Orion",
            "company": "Nimbus",
            "country": "US",
            "licenseStatus": "Closed",
            "releaseDate": "2024-03-01",
            "tags": ["chat", "vision"],
            "contextWindow": 200000
        },
        {
            "name": "orion-mini",
            "company": "Nimbus",
            "licenseStatus": "Closed",
            "contextWindow": 32000,
            "parent": "Orion"
        }
    ]
}"#;

fn http_loader(server: &MockServer) -> HttpLoader {
    HttpLoader::new(&format!("{}/catalog.json", server.uri()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_http_loader_fetches_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CATALOG_JSON))
        .mount(&server)
        .await;

    let records = http_loader(&server).load().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Orion");
    assert_eq!(records[0].license_status, LicenseStatus::Closed);
    assert_eq!(records[0].tags, vec!["chat", "vision"]);
    assert_eq!(records[1].parent.as_deref(), Some("Orion"));
}

#[tokio::test]
async fn test_http_loader_reports_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = http_loader(&server).load().await.unwrap_err();
    assert!(matches!(err, LoadError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_http_loader_reports_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = http_loader(&server).load().await.unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
}

#[tokio::test]
async fn test_json_file_loader_reads_disk() {
    let path = std::env::temp_dir().join(format!(
        "model-catalog-loader-{}.json",
        std::process::id()
    ));
    tokio::fs::write(&path, CATALOG_JSON).await.unwrap();

    let loader = JsonFileLoader::new(&path);
    let store = RecordStore::load(&loader).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(store.len(), 2);
    assert!(store.source().starts_with("file:"));
    assert_eq!(store.children_of("Orion").len(), 1);
}

#[tokio::test]
async fn test_json_file_loader_missing_file() {
    let loader = JsonFileLoader::new("/nonexistent/model-catalog/models.json");
    let err = loader.load().await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
