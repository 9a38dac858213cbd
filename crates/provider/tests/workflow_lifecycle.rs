//! End-to-end lifecycle tests: configure the provider against a mock n8n,
//! then drive the workflow resource through create and delete.

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use opaasn8n_provider::{
    ConfiguredProvider, Provider, ProviderConfig, Resource, WorkflowPlan, WorkflowState,
};

const TOKEN: &str = "lifecycle-key";
const WORKFLOWS_PATH: &str = "/api/v1/workflows";

fn configure(server: &MockServer) -> ConfiguredProvider {
    Provider::new("test")
        .configure(ProviderConfig {
            token: Some(TOKEN.to_string()),
            url: Some(format!("{}{WORKFLOWS_PATH}", server.uri())),
            request_timeout_secs: Some(5),
        })
        .expect("provider should configure")
}

#[tokio::test]
async fn create_then_delete_round_trip() {
    let server = MockServer::start().await;
    let definition = r#"{"name":"sync","nodes":[]}"#;

    Mock::given(method("POST"))
        .and(path(WORKFLOWS_PATH))
        .and(header("X-N8N-API-KEY", TOKEN))
        .and(body_json(json!({ "certificate": definition })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "abc123" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{WORKFLOWS_PATH}/abc123")))
        .and(header("X-N8N-API-KEY", TOKEN))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let resource = configure(&server).workflow_resource();

    let state = resource
        .create(&WorkflowPlan {
            workflow: definition.to_string(),
        })
        .await
        .expect("create should succeed");
    assert_eq!(
        state,
        WorkflowState {
            id: "abc123".into(),
            workflow: definition.into(),
        }
    );

    resource.delete(&state).await.expect("delete should succeed");
}

#[tokio::test]
async fn create_failure_reports_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .expect(1)
        .mount(&server)
        .await;

    let diags = configure(&server)
        .workflow_resource()
        .create(&WorkflowPlan {
            workflow: "{}".into(),
        })
        .await
        .unwrap_err();

    let d = diags.iter().next().unwrap();
    assert_eq!(d.summary, "Not created");
    assert!(d.detail.contains("server error"));
}

#[tokio::test]
async fn delete_of_missing_workflow_reports_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{WORKFLOWS_PATH}/gone")))
        .respond_with(ResponseTemplate::new(404).set_body_string("workflow not found"))
        .expect(1)
        .mount(&server)
        .await;

    let diags = configure(&server)
        .workflow_resource()
        .delete(&WorkflowState {
            id: "gone".into(),
            workflow: "{}".into(),
        })
        .await
        .unwrap_err();

    let d = diags.iter().next().unwrap();
    assert_eq!(d.summary, "Not deleted");
    assert_eq!(d.detail, "workflow not found");
}

#[tokio::test]
async fn malformed_create_response_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":"))
        .mount(&server)
        .await;

    let diags = configure(&server)
        .workflow_resource()
        .create(&WorkflowPlan {
            workflow: "{}".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(diags.iter().next().unwrap().summary, "Unexpected response");
}

#[tokio::test]
async fn unreachable_host_reports_post_failure() {
    let configured = Provider::new("test")
        .configure(ProviderConfig {
            token: Some(TOKEN.into()),
            url: Some("http://127.0.0.1:1/api/v1/workflows".into()),
            request_timeout_secs: Some(5),
        })
        .unwrap();

    let diags = configured
        .workflow_resource()
        .create(&WorkflowPlan {
            workflow: "{}".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(diags.iter().next().unwrap().summary, "Cannot send post request");
}

/// A response whose body is cut short surfaces as a read failure instead
/// of aborting.
#[tokio::test]
async fn truncated_response_reports_read_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let content_length = String::from_utf8_lossy(&buf[..header_end])
            .to_ascii_lowercase()
            .lines()
            .find_map(|l| l.strip_prefix("content-length:").map(|v| v.trim().to_string()))
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\n\r\nshort")
            .await
            .unwrap();
        socket.shutdown().await.ok();
    });

    let configured = Provider::new("test")
        .configure(ProviderConfig {
            token: Some(TOKEN.into()),
            url: Some(format!("http://{addr}{WORKFLOWS_PATH}")),
            request_timeout_secs: Some(5),
        })
        .unwrap();

    let diags = configured
        .workflow_resource()
        .create(&WorkflowPlan {
            workflow: "{}".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(diags.iter().next().unwrap().summary, "Cannot read response body");
}
