mod catalog_stub;

use bookfinder::catalog::{CatalogClient, CatalogError, ErrorKind};
use bookfinder::config::CatalogConfig;
use bookfinder::volume::ImageSize;

use catalog_stub::{CatalogStub, StubBehavior, unreachable_base_url};

fn client_for(base_url: &str, api_key: Option<&str>) -> CatalogClient {
    let config = CatalogConfig::new(base_url, api_key.map(str::to_owned));
    CatalogClient::new(config).expect("build catalog client")
}

const FULL_VOLUME: &str = r#"{
    "kind": "books#volume",
    "id": "kkYPEAAAQBAJ",
    "volumeInfo": {
        "title": "The Rust Programming Language",
        "subtitle": "2nd Edition",
        "authors": ["Steve Klabnik", "Carol Nichols"],
        "publisher": "No Starch Press",
        "publishedDate": "2023-02-28",
        "description": "<p>The official book on the Rust programming language.</p>",
        "industryIdentifiers": [
            {"type": "ISBN_13", "identifier": "9781718503106"}
        ],
        "pageCount": 560,
        "categories": ["Computers"],
        "imageLinks": {
            "smallThumbnail": "https://example.com/small.png",
            "thumbnail": "https://example.com/thumb.png",
            "medium": "https://example.com/medium.png"
        },
        "language": "en",
        "previewLink": "https://example.com/preview",
        "infoLink": "https://example.com/info"
    }
}"#;

#[tokio::test]
async fn blank_id_fails_before_any_network_call() {
    let stub = CatalogStub::spawn(StubBehavior::Json(FULL_VOLUME.to_string()));
    let client = client_for(&stub.base_url, Some("test-key"));

    for id in ["", "   "] {
        let err = client.volume(id).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidVolumeId), "id {id:?}");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    assert_eq!(stub.request_count(), 0);
}

#[tokio::test]
async fn details_parse_the_full_record() {
    let stub = CatalogStub::spawn(StubBehavior::Json(FULL_VOLUME.to_string()));
    let client = client_for(&stub.base_url, Some("test-key"));

    let volume = client.volume("kkYPEAAAQBAJ").await.unwrap();
    let info = &volume.volume_info;

    assert_eq!(volume.id, "kkYPEAAAQBAJ");
    assert_eq!(info.title, "The Rust Programming Language");
    assert_eq!(info.subtitle.as_deref(), Some("2nd Edition"));
    assert_eq!(info.publisher.as_deref(), Some("No Starch Press"));
    assert_eq!(info.page_count, Some(560));
    assert_eq!(info.industry_identifiers[0].identifier, "9781718503106");
    assert_eq!(
        info.image_links.get(ImageSize::Medium),
        Some("https://example.com/medium.png")
    );
    assert_eq!(
        info.image_links.cover(),
        Some("https://example.com/medium.png")
    );

    let url = stub.last_url().unwrap();
    assert!(
        url.starts_with("/volumes/kkYPEAAAQBAJ?"),
        "unexpected url: {url}"
    );
    assert!(url.contains("key=test-key"));
}

#[tokio::test]
async fn missing_volume_classifies_as_not_found() {
    let stub = CatalogStub::spawn(StubBehavior::Status(
        404,
        r#"{"error": {"code": 404, "message": "volume not found"}}"#.to_string(),
    ));
    let client = client_for(&stub.base_url, Some("test-key"));

    let err = client.volume("doesnotexist").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        err.to_string(),
        "failed to fetch book details: volume not found"
    );
}

#[tokio::test]
async fn error_body_without_message_falls_back_to_status_text() {
    let stub = CatalogStub::spawn(StubBehavior::Status(404, "{}".to_string()));
    let client = client_for(&stub.base_url, Some("test-key"));

    let err = client.volume("doesnotexist").await.unwrap_err();

    assert_eq!(err.to_string(), "failed to fetch book details: Not Found");
    // The canonical status text still mentions "not found".
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn connection_failure_is_transport_not_upstream() {
    let client = client_for(&unreachable_base_url(), Some("test-key"));

    let err = client.volume("kkYPEAAAQBAJ").await.unwrap_err();

    assert!(matches!(err, CatalogError::Transport(_)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Transport);
}
