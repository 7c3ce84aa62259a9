//! Transport-level behavior against a mock server: headers, envelope
//! unwrapping and error mapping per surface.

use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{basic_auth, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nextcloud_deck::{DeckClient, DeckConfig, DeckError, Surface};

fn client_for(server: &MockServer) -> DeckClient {
    DeckClient::new(DeckConfig::new(server.uri(), "jane", "secret"))
}

#[tokio::test]
async fn rest_surface_returns_payload_directly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.php/apps/deck/api/v1.0/boards"))
        .and(basic_auth("jane", "secret"))
        .and(header("OCS-APIRequest", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "title": "Board"}])))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .call(Method::GET, Surface::Deck, "/boards", None)
        .await
        .unwrap();
    assert_eq!(payload, json!([{"id": 1, "title": "Board"}]));
}

#[tokio::test]
async fn ocs_surface_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ocs/v2.php/apps/deck/api/v1.0/cards/5/comments"))
        .and(header("OCS-APIRequest", "true"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ocs": {
                "meta": {"status": "ok", "statuscode": 200},
                "data": [{"id": 9, "message": "hello"}]
            }
        })))
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .call(Method::GET, Surface::DeckOcs, "/cards/5/comments", None)
        .await
        .unwrap();
    assert_eq!(payload, json!([{"id": 9, "message": "hello"}]));
}

#[tokio::test]
async fn empty_success_body_becomes_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/index.php/apps/deck/api/v1.0/boards/17"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .call(Method::DELETE, Surface::Deck, "/boards/17", None)
        .await
        .unwrap();
    assert!(payload.is_null());
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call(Method::GET, Surface::Deck, "/boards", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DeckError::AuthenticationFailed { .. }));
    assert!(err.to_string().contains("app password"));
}

#[tokio::test]
async fn not_found_maps_to_resource_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "board not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call(Method::GET, Surface::Deck, "/boards/999", None)
        .await
        .unwrap_err();
    match err {
        DeckError::ResourceNotFound { message } => assert_eq!(message, "board not found"),
        other => panic!("expected ResourceNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn ocs_error_message_extracted_from_meta() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ocs": {"meta": {"status": "failure", "message": "message must not be empty"}}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call(
            Method::POST,
            Surface::DeckOcs,
            "/cards/5/comments",
            Some(&json!({"message": ""})),
        )
        .await
        .unwrap_err();
    match err {
        DeckError::RemoteApi { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "message must not be empty");
        }
        other => panic!("expected RemoteApi, got {other:?}"),
    }
}

#[tokio::test]
async fn webdav_returns_raw_body_and_status() {
    let server = MockServer::start().await;
    let xml = r#"<?xml version="1.0"?><d:multistatus xmlns:d="DAV:"></d:multistatus>"#;
    Mock::given(method("PROPFIND"))
        .and(path("/remote.php/dav/comments/deckCard/42"))
        .and(header("OCS-APIRequest", "true"))
        .respond_with(
            ResponseTemplate::new(207)
                .set_body_raw(xml, "application/xml; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let response = client_for(&server)
        .webdav(
            Method::from_bytes(b"PROPFIND").unwrap(),
            "/deckCard/42",
            None,
            "application/xml",
        )
        .await
        .unwrap();
    assert_eq!(response.status, 207);
    assert_eq!(response.body, xml);
    assert!(response
        .content_type
        .as_deref()
        .unwrap()
        .starts_with("application/xml"));
}

#[tokio::test]
async fn webdav_failure_maps_like_json_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .webdav(
            Method::from_bytes(b"PROPFIND").unwrap(),
            "/deckCard/42",
            None,
            "application/xml",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DeckError::AuthenticationFailed { .. }));
}
