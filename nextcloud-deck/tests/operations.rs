//! End-to-end dispatch scenarios against a mock server.

use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nextcloud_deck::{dispatch_str, DeckClient, DeckConfig, DeckError, Params};

const DECK: &str = "/index.php/apps/deck/api/v1.0";
const DECK_OCS: &str = "/ocs/v2.php/apps/deck/api/v1.0";

fn client_for(server: &MockServer) -> DeckClient {
    DeckClient::new(DeckConfig::new(server.uri(), "jane", "secret"))
}

fn ocs(data: serde_json::Value) -> serde_json::Value {
    json!({"ocs": {"meta": {"status": "ok"}, "data": data}})
}

#[tokio::test]
async fn board_create_sends_exact_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DECK}/boards")))
        .and(body_json(json!({"title": "Sprint Backlog", "color": "0066CC"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 17, "title": "Sprint Backlog", "color": "0066CC"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::from_value(json!({"title": "Sprint Backlog", "color": "0066CC"})).unwrap();
    let envelope = dispatch_str(&client_for(&server), "board", "create", &params)
        .await
        .unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.resource, "board");
    assert_eq!(envelope.operation, "create");
    assert_eq!(envelope.data["board"]["id"], json!(17));
    assert!(envelope.side_effects.is_empty());
}

#[tokio::test]
async fn board_delete_and_restore_hit_expected_paths() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{DECK}/boards/17")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{DECK}/boards/17/undo_delete")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 17, "title": "Sprint Backlog"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = Params::from_value(json!({"boardId": "17"})).unwrap();

    let envelope = dispatch_str(&client, "board", "delete", &params).await.unwrap();
    assert!(envelope.success);

    let envelope = dispatch_str(&client, "board", "undoDelete", &params)
        .await
        .unwrap();
    assert_eq!(envelope.data["board"]["title"], json!("Sprint Backlog"));
}

#[tokio::test]
async fn stack_update_echoes_current_order_for_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DECK}/boards/17/stacks/3")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "title": "Doing", "boardId": 17, "order": 5
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{DECK}/boards/17/stacks/3")))
        .and(body_json(json!({"title": "In Progress", "boardId": 17, "order": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "title": "In Progress", "boardId": 17, "order": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::from_value(json!({
        "boardId": {"mode": "list", "value": "17"},
        "stackId": "3",
        "title": "In Progress",
        "order": 0,
    }))
    .unwrap();
    let envelope = dispatch_str(&client_for(&server), "stack", "update", &params)
        .await
        .unwrap();
    assert_eq!(envelope.data["stack"]["order"], json!(5));
}

#[tokio::test]
async fn card_update_echoes_current_order_for_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards/42")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "title": "Old title", "stackId": 3, "order": 7
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards/42")))
        .and(body_json(json!({"title": "Renamed", "order": 7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "title": "Renamed", "stackId": 3, "order": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::from_value(json!({
        "boardId": "17",
        "stackId": "3",
        "cardId": "42",
        "title": "Renamed",
        "order": 0,
    }))
    .unwrap();
    let envelope = dispatch_str(&client_for(&server), "card", "update", &params)
        .await
        .unwrap();
    assert_eq!(envelope.data["card"]["order"], json!(7));
}

#[tokio::test]
async fn card_assign_user_resolves_picker_selector() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards/42/assignUser")))
        .and(body_json(json!({"userId": "jdoe"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::from_value(json!({
        "boardId": "17",
        "stackId": "3",
        "cardId": "42",
        "userId": {"mode": "list", "value": "jdoe"},
    }))
    .unwrap();
    let envelope = dispatch_str(&client_for(&server), "card", "assignUser", &params)
        .await
        .unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.message.as_deref(), Some("user assigned"));
}

#[tokio::test]
async fn card_create_records_failed_assignment_as_side_effect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards")))
        .and(body_json(json!({"title": "New task"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 42, "title": "New task"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards/42/assignUser")))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "not a board member"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::from_value(json!({
        "boardId": "17",
        "stackId": "3",
        "title": "New task",
        "assignUser": "jdoe",
    }))
    .unwrap();
    let envelope = dispatch_str(&client_for(&server), "card", "create", &params)
        .await
        .unwrap();

    // The card exists, so the operation stays successful; the failed
    // assignment is reported instead of swallowed.
    assert!(envelope.success);
    assert_eq!(envelope.side_effects.len(), 1);
    let effect = &envelope.side_effects[0];
    assert_eq!(effect.action, "assignUser");
    assert_eq!(effect.target, "jdoe");
    assert!(!effect.success);
    assert!(effect.error.as_deref().unwrap().contains("not a board member"));
}

#[tokio::test]
async fn card_create_applies_user_and_labels() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 42, "title": "New task"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards/42/assignUser")))
        .and(body_json(json!({"userId": "jdoe"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards/42/assignLabel")))
        .and(body_json(json!({"labelId": 7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::from_value(json!({
        "boardId": "17",
        "stackId": "3",
        "title": "New task",
        "assignUser": {"mode": "list", "value": "jdoe"},
        "assignLabels": ["7"],
    }))
    .unwrap();
    let envelope = dispatch_str(&client_for(&server), "card", "create", &params)
        .await
        .unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.side_effects.len(), 2);
    assert!(envelope.side_effects.iter().all(|effect| effect.success));
}

#[tokio::test]
async fn label_create_strips_leading_hash_from_color() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DECK}/boards/17/labels")))
        .and(body_json(json!({"title": "Bug", "color": "0066CC"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "title": "Bug", "color": "0066CC"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params =
        Params::from_value(json!({"boardId": "17", "title": "Bug", "color": "#0066CC"})).unwrap();
    let envelope = dispatch_str(&client_for(&server), "label", "create", &params)
        .await
        .unwrap();
    assert_eq!(envelope.data["label"]["color"], json!("0066CC"));
}

#[tokio::test]
async fn comment_get_filters_collection_and_reports_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DECK_OCS}/cards/42/comments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(ocs(json!([
            {"id": 9, "message": "first"},
            {"id": 10, "message": "second"}
        ]))))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let params = Params::from_value(json!({"cardId": "42", "commentId": "10"})).unwrap();
    let envelope = dispatch_str(&client, "comment", "get", &params).await.unwrap();
    assert_eq!(envelope.data["comment"]["message"], json!("second"));

    let params = Params::from_value(json!({"cardId": "42", "commentId": "99"})).unwrap();
    let err = dispatch_str(&client, "comment", "get", &params)
        .await
        .unwrap_err();
    assert!(matches!(err, DeckError::ResourceNotFound { .. }));
}

#[tokio::test]
async fn comment_get_all_passes_paging_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DECK_OCS}/cards/42/comments")))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ocs(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::from_value(json!({"cardId": "42", "limit": 10, "offset": 20})).unwrap();
    let envelope = dispatch_str(&client_for(&server), "comment", "getAll", &params)
        .await
        .unwrap();
    assert_eq!(envelope.message.as_deref(), Some("0 comments found"));
}

#[tokio::test]
async fn attachment_create_uploads_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards/42/attachments")))
        .and(body_string_contains("name=\"type\""))
        .and(body_string_contains("deck_file"))
        .and(body_string_contains("/Documents/spec.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "type": "deck_file", "data": "/Documents/spec.pdf"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::from_value(json!({
        "boardId": "17",
        "stackId": "3",
        "cardId": "42",
        "type": "deck_file",
        "data": "/Documents/spec.pdf",
    }))
    .unwrap();
    let envelope = dispatch_str(&client_for(&server), "attachment", "create", &params)
        .await
        .unwrap();
    assert_eq!(envelope.data["attachment"]["id"], json!(5));
}

#[tokio::test]
async fn attachment_create_sends_binary_as_file_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards/42/attachments")))
        .and(body_string_contains("name=\"type\""))
        .and(body_string_contains("file"))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 6, "type": "file", "data": "notes.txt"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // "aGVsbG8=" is base64 for "hello"
    let params = Params::from_value(json!({
        "boardId": "17",
        "stackId": "3",
        "cardId": "42",
        "type": "file",
        "data": "notes.txt",
        "binary": "aGVsbG8=",
        "fileName": "notes.txt",
    }))
    .unwrap();
    let envelope = dispatch_str(&client_for(&server), "attachment", "create", &params)
        .await
        .unwrap();
    assert_eq!(envelope.data["attachment"]["id"], json!(6));
}

#[tokio::test]
async fn attachment_create_without_binary_sends_data_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards/42/attachments")))
        .and(body_string_contains("name=\"type\""))
        .and(body_string_contains("name=\"data\""))
        .and(body_string_contains("inline text content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "type": "file", "data": "inline text content"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = Params::from_value(json!({
        "boardId": "17",
        "stackId": "3",
        "cardId": "42",
        "type": "file",
        "data": "inline text content",
    }))
    .unwrap();
    let envelope = dispatch_str(&client_for(&server), "attachment", "create", &params)
        .await
        .unwrap();
    assert_eq!(envelope.data["attachment"]["id"], json!(7));
}

#[tokio::test]
async fn attachment_get_reports_missing_from_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DECK}/boards/17/stacks/3/cards/42/attachments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 5}])))
        .mount(&server)
        .await;

    let params = Params::from_value(json!({
        "boardId": "17",
        "stackId": "3",
        "cardId": "42",
        "attachmentId": "6",
    }))
    .unwrap();
    let err = dispatch_str(&client_for(&server), "attachment", "get", &params)
        .await
        .unwrap_err();
    match err {
        DeckError::ResourceNotFound { message } => assert_eq!(message, "attachment 6"),
        other => panic!("expected ResourceNotFound, got {other:?}"),
    }
}
