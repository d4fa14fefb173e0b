//! Integration tests for the publish, packument, and search endpoints.

mod common;

use axum::http::StatusCode;
use common::fixtures::publish_document;
use common::server::TestServer;
use pantry_core::PackageName;
use semver::Version;

#[tokio::test]
async fn ping_answers_empty_object() {
    let server = TestServer::new();

    let (status, _, body) = server.request("GET", "/-/ping", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({}));
}

#[tokio::test]
async fn publish_without_cookie_succeeds() {
    let server = TestServer::new();

    let (status, _, body) = server
        .request(
            "PUT",
            "/test-pkg",
            Some(publish_document("test-pkg", "1.0.0")),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.get("ok").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(body.get("id").and_then(|v| v.as_str()), Some("test-pkg"));
    assert_eq!(body.get("version").and_then(|v| v.as_str()), Some("1.0.0"));

    // The store reports the pair as existing
    assert!(server.state.store.exists(
        &PackageName::parse("test-pkg").unwrap(),
        &Version::new(1, 0, 0)
    ));
}

#[tokio::test]
async fn duplicate_publish_is_rejected_with_conflict() {
    let server = TestServer::new();

    let (status, _, _) = server
        .request(
            "PUT",
            "/test-pkg",
            Some(publish_document("test-pkg", "1.0.0")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = server
        .request(
            "PUT",
            "/test-pkg",
            Some(publish_document("test-pkg", "1.0.0")),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.get("error").and_then(|v| v.as_str()), Some("conflict"));

    // Store state is intact
    assert!(server.state.store.exists(
        &PackageName::parse("test-pkg").unwrap(),
        &Version::new(1, 0, 0)
    ));
}

#[tokio::test]
async fn publishing_a_second_version_succeeds() {
    let server = TestServer::new();

    for version in ["1.0.0", "1.1.0"] {
        let (status, _, _) = server
            .request(
                "PUT",
                "/test-pkg",
                Some(publish_document("test-pkg", version)),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _, body) = server.request("GET", "/test-pkg", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.pointer("/dist-tags/latest").and_then(|v| v.as_str()),
        Some("1.1.0")
    );
    assert_eq!(
        body.get("versions").and_then(|v| v.as_object()).map(|m| m.len()),
        Some(2)
    );
}

#[tokio::test]
async fn malformed_publish_documents_are_client_errors() {
    let server = TestServer::new();

    // Name mismatch with the URL path
    let (status, _, _) = server
        .request(
            "PUT",
            "/other-pkg",
            Some(publish_document("test-pkg", "1.0.0")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No versions at all
    let mut doc = publish_document("test-pkg", "1.0.0");
    doc["versions"] = serde_json::json!({});
    let (status, _, _) = server.request("PUT", "/test-pkg", Some(doc), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Version key is not semver
    let mut doc = publish_document("test-pkg", "1.0.0");
    let metadata = doc["versions"]["1.0.0"].clone();
    doc["versions"] = serde_json::json!({ "banana": metadata });
    let (status, _, _) = server.request("PUT", "/test-pkg", Some(doc), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was stored along the way
    assert!(server.state.store.is_empty());
}

#[tokio::test]
async fn search_finds_published_package() {
    let server = TestServer::new();

    server
        .request(
            "PUT",
            "/test-pkg",
            Some(publish_document("test-pkg", "1.0.0")),
            None,
        )
        .await;

    let (status, _, body) = server
        .request("GET", "/-/v1/search?text=test-pkg", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("total").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(
        body.pointer("/objects/0/package/name").and_then(|v| v.as_str()),
        Some("test-pkg")
    );
    assert_eq!(
        body.pointer("/objects/0/package/version").and_then(|v| v.as_str()),
        Some("1.0.0")
    );
}

#[tokio::test]
async fn search_for_unknown_package_returns_no_objects() {
    let server = TestServer::new();

    let (status, _, body) = server
        .request("GET", "/-/v1/search?text=no-such-pkg", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("total").and_then(|v| v.as_u64()), Some(0));
    assert_eq!(
        body.get("objects").and_then(|v| v.as_array()).map(|a| a.len()),
        Some(0)
    );
}

#[tokio::test]
async fn search_is_idempotent() {
    let server = TestServer::new();

    server
        .request(
            "PUT",
            "/test-pkg",
            Some(publish_document("test-pkg", "1.0.0")),
            None,
        )
        .await;

    let (_, _, first) = server
        .request("GET", "/-/v1/search?text=test", None, None)
        .await;
    let (_, _, second) = server
        .request("GET", "/-/v1/search?text=test", None, None)
        .await;

    assert_eq!(first.get("objects"), second.get("objects"));
    assert_eq!(first.get("total"), second.get("total"));
}

#[tokio::test]
async fn search_without_text_is_a_client_error() {
    let server = TestServer::new();

    let (status, _, _) = server.request("GET", "/-/v1/search", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = server
        .request("GET", "/-/v1/search?text=", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_respects_pagination() {
    let server = TestServer::new();

    for name in ["pad-a", "pad-b", "pad-c"] {
        server
            .request("PUT", &format!("/{name}"), Some(publish_document(name, "1.0.0")), None)
            .await;
    }

    let (status, _, body) = server
        .request("GET", "/-/v1/search?text=pad&size=2&from=1", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("total").and_then(|v| v.as_u64()), Some(3));
    let names: Vec<&str> = body["objects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.pointer("/package/name").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["pad-b", "pad-c"]);
}

#[tokio::test]
async fn packument_roundtrip_after_publish() {
    let server = TestServer::new();

    server
        .request(
            "PUT",
            "/test-pkg",
            Some(publish_document("test-pkg", "1.0.0")),
            None,
        )
        .await;

    let (status, _, body) = server.request("GET", "/test-pkg", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("name").and_then(|v| v.as_str()), Some("test-pkg"));
    assert!(body.pointer("/versions/1.0.0").is_some());
    assert!(body.pointer("/time/1.0.0").is_some());
    assert!(body.pointer("/time/modified").is_some());
}

#[tokio::test]
async fn packument_for_unknown_package_is_404() {
    let server = TestServer::new();

    let (status, _, body) = server.request("GET", "/never-published", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.get("error").and_then(|v| v.as_str()), Some("not_found"));
}

#[tokio::test]
async fn unknown_routes_are_404() {
    let server = TestServer::new();

    let (status, _, _) = server
        .request("GET", "/-/v1/does-not-exist", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
