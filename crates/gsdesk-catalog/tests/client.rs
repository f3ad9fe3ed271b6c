//! Integration tests for `CatalogClient` using wiremock HTTP mocks.

use gsdesk_catalog::{CatalogClient, CatalogError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXEC_PATH: &str = "/macros/s/test-deployment/exec";

fn test_client(server: &MockServer) -> CatalogClient {
    let endpoint = format!("{}{EXEC_PATH}", server.uri());
    CatalogClient::new(Some(&endpoint), "gsdesk-test/0.1")
        .expect("client construction should not fail")
}

async fn mount_json(server: &MockServer, status: u16, body: &serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(EXEC_PATH))
        .and(query_param("action", "listProducts"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_catalog_returns_parsed_payload() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "ok": true,
        "data": {
            "headerTop": ["기본", "", "가격"],
            "headerBottom": ["코드", "품명", "온라인"],
            "header": ["code", "name", "online"],
            "columns": [
                { "key": "c3", "index": 3, "label": "비고", "top": "", "bottom": "비고" }
            ],
            "count": 2,
            "items": [
                {
                    "code": "A1",
                    "name": "스텐 작업대",
                    "size": "1200*600*800",
                    "category": "WRK",
                    "deal": 11000,
                    "online": 12345,
                    "cost": 8000,
                    "discountRate": 0.1,
                    "_raw": ["A1", "스텐 작업대", 12345, "주문제작"]
                },
                {
                    "code": "B2",
                    "name": "1조 싱크대",
                    "online": "",
                    "deal": "90,000",
                    "_raw": ["B2", "1조 싱크대", "", ""]
                }
            ]
        }
    });
    mount_json(&server, 200, &body).await;

    let payload = test_client(&server)
        .fetch_catalog()
        .await
        .expect("should parse catalog");

    assert_eq!(payload.count, 2);
    assert_eq!(payload.items.len(), 2);
    assert_eq!(payload.header, vec!["code", "name", "online"]);
    assert_eq!(payload.columns.len(), 1);

    let first = &payload.items[0];
    assert_eq!(first.code, "A1");
    assert_eq!(first.category, "WRK");
    assert!((first.online - 12_345.0).abs() < f64::EPSILON);
    assert_eq!(first.raw_cell_text(&payload.columns[0]), "주문제작");

    let second = &payload.items[1];
    assert!(second.online.abs() < f64::EPSILON);
    assert!((second.deal - 90_000.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn ok_envelope_without_items_is_empty_catalog() {
    let server = MockServer::start().await;
    mount_json(&server, 200, &serde_json::json!({ "ok": true, "data": {} })).await;

    let payload = test_client(&server)
        .fetch_catalog()
        .await
        .expect("partial envelope should not fail");

    assert_eq!(payload.count, 0);
    assert!(payload.items.is_empty());
    assert!(payload.columns.is_empty());
}

#[tokio::test]
async fn envelope_without_ok_field_is_accepted() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        200,
        &serde_json::json!({ "data": { "items": [{ "code": "A1" }] } }),
    )
    .await;

    let payload = test_client(&server).fetch_catalog().await.unwrap();
    assert_eq!(payload.count, 1);
}

#[tokio::test]
async fn ok_false_returns_remote_error_with_message() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        200,
        &serde_json::json!({ "ok": false, "message": "시트를 찾을 수 없습니다" }),
    )
    .await;

    let err = test_client(&server).fetch_catalog().await.unwrap_err();

    assert!(
        matches!(err, CatalogError::Remote(ref m) if m == "시트를 찾을 수 없습니다"),
        "expected Remote error, got: {err:?}"
    );
    assert!(err.to_string().contains("시트를 찾을 수 없습니다"));
}

#[tokio::test]
async fn non_success_status_returns_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EXEC_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_catalog().await.unwrap_err();

    assert!(
        matches!(err, CatalogError::Status { status: 500 }),
        "expected Status(500), got: {err:?}"
    );
    assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn invalid_json_returns_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EXEC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_catalog().await.unwrap_err();
    assert!(
        matches!(err, CatalogError::Parse(_)),
        "expected Parse error, got: {err:?}"
    );
}

#[tokio::test]
async fn failed_request_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EXEC_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.fetch_catalog().await.is_err());
    // `expect(1)` is verified when the server drops.
}
