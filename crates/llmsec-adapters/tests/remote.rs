//! Remote backend tests against an in-process collaborator service.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::post, Json, Router};
use llmsec_adapters::{
    AdapterError, EdgeAgentAdapter, IncidentAdapter, PolicyAdapter, RemoteBackend, ShieldAdapter,
};
use llmsec_model::{
    FilterMode, IncidentSignal, PolicyDecision, RequestKind, SecurityRequest, Severity,
};
use serde_json::{json, Value};

/// Serves `router` on an ephemeral port and returns its base URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn backend(base_url: &str) -> Arc<RemoteBackend> {
    Arc::new(RemoteBackend::new(base_url, Duration::from_secs(5)).unwrap())
}

fn request() -> SecurityRequest {
    SecurityRequest::new("remote-1", RequestKind::Output, "model says hi")
}

fn collaborator() -> Router {
    Router::new()
        .route(
            "/evaluate",
            post(|Json(body): Json<Value>| async move {
                // Echo the request id back as a policy id so the body is checked.
                let id = body["id"].as_str().unwrap_or("missing").to_string();
                Json(json!([
                    { "policyId": id, "action": "allow" },
                    { "policyId": "tone", "action": "redact", "reason": "profanity" }
                ]))
            }),
        )
        .route(
            "/filter",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["mode"], "output");
                Json(json!({ "redactions": [{ "start": 0, "end": 5, "reason": "name" }] }))
            }),
        )
        .route(
            "/enforce",
            post(|Json(body): Json<Value>| async move {
                let denied = body["decision"]["action"] == "deny";
                Json(json!({ "enforced": !denied, "modifications": body["request"]["content"] }))
            }),
        )
        .route(
            "/emit",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "incidentId": format!("INC-{}", body["severity"].as_str().unwrap_or("?")) }))
            }),
        )
}

#[tokio::test]
async fn test_remote_policy_evaluation() {
    let base = spawn(collaborator()).await;
    let adapter = PolicyAdapter::new(Some(backend(&base)));

    let decisions = adapter.evaluate(&request()).await.unwrap();
    assert_eq!(decisions.len(), 2);
    assert_eq!(decisions[0].policy_id, "remote-1");
    assert_eq!(decisions[1].reason.as_deref(), Some("profanity"));
}

#[tokio::test]
async fn test_remote_shield_missing_filtered_keeps_content() {
    let base = spawn(collaborator()).await;
    let adapter = ShieldAdapter::new(Some(backend(&base)));

    let outcome = adapter.filter("Alice wrote this", FilterMode::Output).await.unwrap();
    assert_eq!(outcome.filtered, "Alice wrote this");
    assert_eq!(outcome.redactions.len(), 1);
    assert_eq!(outcome.redactions[0].end, 5);
}

#[tokio::test]
async fn test_remote_enforcement() {
    let base = spawn(collaborator()).await;
    let adapter = EdgeAgentAdapter::new(Some(backend(&base)));

    let allowed = adapter
        .enforce(&request(), &PolicyDecision::allow("p"))
        .await
        .unwrap();
    assert!(allowed.enforced);
    assert_eq!(allowed.modifications.as_deref(), Some("model says hi"));

    let denied = adapter
        .enforce(&request(), &PolicyDecision::deny("p"))
        .await
        .unwrap();
    assert!(!denied.enforced);
}

#[tokio::test]
async fn test_remote_incident_emit() {
    let base = spawn(collaborator()).await;
    let adapter = IncidentAdapter::new(Some(backend(&base)));

    let signal = IncidentSignal::violation(&request(), "tone", Severity::Medium);
    let receipt = adapter.emit(&signal).await.unwrap();
    assert_eq!(receipt.incident_id, "INC-medium");
}

#[tokio::test]
async fn test_remote_error_status_is_adapter_error() {
    let router = Router::new().route(
        "/evaluate",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
    );
    let base = spawn(router).await;
    let adapter = PolicyAdapter::new(Some(backend(&base)));

    let err = adapter.evaluate(&request()).await.unwrap_err();
    assert!(matches!(err, AdapterError::Policy(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_remote_unreachable_is_adapter_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let adapter = ShieldAdapter::new(Some(backend(&format!("http://{}", addr))));
    let err = adapter.filter("x", FilterMode::Prompt).await.unwrap_err();
    assert_eq!(err.collaborator(), "shield");
}
