// Integration tests for the store clients using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skydeck_api::{AuthClient, BlobClient, DocumentClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DocumentClient) {
    let server = MockServer::start().await;
    let client = DocumentClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Document happy paths ────────────────────────────────────────────

#[tokio::test]
async fn test_query_with_filters() {
    let (server, client) = setup().await;

    let body = json!({
        "documents": [
            {
                "id": "c1",
                "createdAt": "2024-05-01T12:00:00Z",
                "droneId": "krok",
                "type": "photo",
                "title": "Flight test",
                "titleUk": "Льотні випробування",
                "fileUrl": "https://blobs.example/krok/photos/1.jpg",
                "order": 2
            },
            {
                "id": "c2",
                "droneId": "krok",
                "type": "photo",
                "title": "Assembly",
                "fileUrl": "https://blobs.example/krok/photos/2.jpg",
                "order": 1
            },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v1/content"))
        .and(query_param("droneId", "krok"))
        .and(query_param("type", "photo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let docs = client
        .query("content", &[("droneId", "krok"), ("type", "photo")])
        .await
        .unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id, "c1");
    assert!(docs[0].created_at.is_some());
    assert_eq!(docs[0].fields["title"], "Flight test");
    assert_eq!(docs[0].fields["order"], 2);
    // Legacy record without createdAt still parses.
    assert!(docs[1].created_at.is_none());
}

#[tokio::test]
async fn test_query_empty_collection() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .mount(&server)
        .await;

    let docs = client.query("content", &[]).await.unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn test_create_returns_generated_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/content"))
        .and(body_partial_json(json!({ "droneId": "krok", "type": "video" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "id": "gen-42", "createdAt": "2024-05-01T12:00:00Z" })),
        )
        .mount(&server)
        .await;

    let id = client
        .create(
            "content",
            &json!({ "droneId": "krok", "type": "video", "title": "Demo", "order": 1 }),
        )
        .await
        .unwrap();

    assert_eq!(id, "gen-42");
}

#[tokio::test]
async fn test_patch_merges_fields() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/content/c1"))
        .and(body_partial_json(json!({ "title": "Renamed" })))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client
        .patch("content", "c1", &json!({ "title": "Renamed" }))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_document() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/content/c1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete("content", "c1").await.unwrap();
}

// ── Document error mapping ──────────────────────────────────────────

#[tokio::test]
async fn test_error_401_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.query("content", &[]).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication, got: {result:?}"
    );
}

#[tokio::test]
async fn test_error_404_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/content/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "No such document" })),
        )
        .mount(&server)
        .await;

    let err = client
        .patch("content", "missing", &json!({ "title": "x" }))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    match err {
        Error::Api {
            status, ref message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "No such document");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_422_carries_code() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/content"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "droneId is required",
            "code": "VALIDATION_ERROR"
        })))
        .mount(&server)
        .await;

    let err = client.create("content", &json!({})).await.unwrap_err();
    assert_eq!(err.api_error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_error_500_is_transient() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.query("content", &[]).await.unwrap_err();
    assert!(err.is_transient());
}

// ── Blob service ────────────────────────────────────────────────────

#[tokio::test]
async fn test_blob_upload_returns_url() {
    let server = MockServer::start().await;
    let blobs = BlobClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();

    Mock::given(method("PUT"))
        .and(path("/v1/blobs/krok/photos/1700000000000_hero.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "url": "https://blobs.example/krok/photos/1700000000000_hero.jpg" }),
        ))
        .mount(&server)
        .await;

    let url = blobs
        .upload(
            "krok/photos/1700000000000_hero.jpg",
            vec![0xFF, 0xD8, 0xFF],
            Some("image/jpeg"),
        )
        .await
        .unwrap();

    assert_eq!(
        url,
        "https://blobs.example/krok/photos/1700000000000_hero.jpg"
    );
}

#[tokio::test]
async fn test_blob_delete_by_url() {
    let server = MockServer::start().await;
    let blobs = BlobClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();

    Mock::given(method("DELETE"))
        .and(path("/v1/blobs"))
        .and(query_param("url", "https://blobs.example/krok/photos/1.jpg"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    blobs
        .delete("https://blobs.example/krok/photos/1.jpg")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_blob_delete_missing_reports_not_found() {
    let server = MockServer::start().await;
    let blobs = BlobClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();

    Mock::given(method("DELETE"))
        .and(path("/v1/blobs"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = blobs.delete("https://blobs.example/gone.jpg").await.unwrap_err();
    assert!(err.is_not_found());
}

// ── Identity ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_sign_in_returns_session() {
    let server = MockServer::start().await;
    let auth = AuthClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .and(body_partial_json(json!({ "email": "admin@example.com" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": "tok-1", "email": "admin@example.com" })),
        )
        .mount(&server)
        .await;

    let session = auth
        .sign_in("admin@example.com", &SecretString::from("hunter2"))
        .await
        .unwrap();

    assert_eq!(session.email, "admin@example.com");
}

#[tokio::test]
async fn test_sign_in_bad_credentials() {
    let server = MockServer::start().await;
    let auth = AuthClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = auth
        .sign_in("admin@example.com", &SecretString::from("wrong"))
        .await;

    assert!(matches!(result, Err(Error::Authentication { .. })));
}
