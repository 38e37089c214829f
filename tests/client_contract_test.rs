//! Patton API contract tests.
//!
//! These verify the exact request each operation sends and how responses,
//! including error responses, are mapped.

use patton_client::{PattonClient, PattonConfig, PattonError, SourceType};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PattonClient {
    PattonClient::new(PattonConfig::default().with_host(server.uri())).unwrap()
}

#[tokio::test]
async fn test_check_dependencies_request_and_result() {
    let server = MockServer::start().await;
    let response = json!({
        "django": {
            "cpes": ["cpe:/a:djangoproject:django:2.0.1"],
            "cves": ["CVE-2018-7536"]
        }
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/check-dependencies"))
        .and(query_param("cpeDetailed", "1"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "source": "auto",
            "libraries": [{"library": "django", "version": "2.0.1"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(response.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.check_dependencies("django:2.0.1").await.unwrap();

    assert_eq!(serde_json::to_value(&result).unwrap(), response);
}

#[tokio::test]
async fn test_check_dependencies_source_override() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/check-dependencies"))
        .and(body_partial_json(json!({"source": "python"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .check_dependencies_with(vec!["requests==2.19.0"], SourceType::Python)
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_check_banners_request_and_result() {
    let server = MockServer::start().await;
    let response = json!({
        "SSH-2.0-OpenSSH_7.4p1": {"cpes": ["cpe:/a:openbsd:openssh:7.4"], "cves": ["CVE-2017-15906"]}
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/check-banners"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!([
            {"banner": "SSH-2.0-OpenSSH_7.4p1", "type": "ssh"}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(response.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.check_banners(["SSH-2.0-OpenSSH_7.4p1"]).await.unwrap();

    assert_eq!(serde_json::to_value(&result).unwrap(), response);
}

#[tokio::test]
async fn test_non_200_returns_literal_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/check-dependencies"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("{\"partial\": \"json that must not be parsed"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.check_dependencies("django:2.0.1").await.unwrap_err();

    match err {
        PattonError::ServerResponse { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "{\"partial\": \"json that must not be parsed");
        }
        other => panic!("expected ServerResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_200_success_class_is_still_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/check-banners"))
        .respond_with(ResponseTemplate::new(202).set_body_string("queued"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.check_banners(["nginx/1.14.0"]).await.unwrap_err();

    assert_eq!(err.server_detail(), Some("queued"));
}

#[tokio::test]
async fn test_unexpected_shape_is_a_server_response_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/check-dependencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"django": ["not", "an", "entry"]})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.check_dependencies("django:2.0.1").await.unwrap_err();

    assert!(matches!(err, PattonError::ServerResponse { status: 200, .. }));
}

#[tokio::test]
async fn test_more_than_300_dependencies_are_truncated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/check-dependencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let query: Vec<String> = (0..320).map(|i| format!("lib{}:{}.0", i, i)).collect();
    let client = client_for(&server);
    client.check_dependencies(query).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let libraries = body["libraries"].as_array().unwrap();
    assert_eq!(libraries.len(), 300);
    assert_eq!(libraries[299], json!({"library": "lib299", "version": "299.0"}));
}

#[tokio::test]
async fn test_undelimited_token_is_sent_name_only() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/check-dependencies"))
        .and(body_json(json!({
            "source": "auto",
            "libraries": [
                {"library": "nginx", "version": ""},
                {"library": "python", "version": "2.7"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.check_dependencies("nginx python:2.7").await.unwrap();
}
