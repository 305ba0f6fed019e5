use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use autodiag_core::{Relay, RelayConfig};
use autodiag_relay::http_server::{app, AppState};
use axum::body::{to_bytes, Body};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

const API_KEY: &str = "sk-test";

#[derive(Default)]
struct Calls {
    threads: AtomicU32,
    status_checks: AtomicU32,
}

type Fake = State<Arc<Calls>>;

fn authorized(headers: &HeaderMap) -> Result<(), StatusCode> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let beta = headers.get("OpenAI-Beta").and_then(|value| value.to_str().ok());
    if bearer == Some("Bearer sk-test") && beta == Some("assistants=v2") {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn create_thread(State(calls): Fake, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    calls.threads.fetch_add(1, Ordering::SeqCst);
    Ok(Json(json!({"id": "thread_new", "object": "thread"})))
}

async fn append_message(
    Path(thread_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    if body["role"] != "user" || body["content"].as_str().unwrap_or_default().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(json!({
        "id": format!("msg_user_{}", thread_id),
        "role": "user",
        "content": [{"type": "text", "text": {"value": body["content"]}}]
    })))
}

async fn create_run(headers: HeaderMap, Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    if body["assistant_id"] != "asst_test" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({"id": "run_1", "status": "queued"})))
}

async fn retrieve_run(
    State(calls): Fake,
    Path((_thread_id, run_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    let checks = calls.status_checks.fetch_add(1, Ordering::SeqCst) + 1;
    let status = if checks < 2 { "in_progress" } else { "completed" };
    Ok(Json(json!({"id": run_id, "status": status})))
}

async fn latest_messages(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorized(&headers)?;
    Ok(Json(json!({
        "data": [{
            "id": "msg_reply",
            "role": "assistant",
            "content": [
                {"type": "text", "text": {"value": "Verifique as pastilhas de freio."}}
            ]
        }]
    })))
}

async fn spawn_fake_api(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn assistants_api(calls: Arc<Calls>) -> Router {
    Router::new()
        .route("/v1/threads", post(create_thread))
        .route("/v1/threads/:thread_id/messages", post(append_message).get(latest_messages))
        .route("/v1/threads/:thread_id/runs", post(create_run))
        .route("/v1/threads/:thread_id/runs/:run_id", get(retrieve_run))
        .with_state(calls)
}

fn relay_state(addr: SocketAddr) -> AppState {
    let config = RelayConfig {
        api_key: Some(API_KEY.to_string()),
        assistant_id: Some("asst_test".to_string()),
        base_url: Some(format!("http://{}/v1", addr)),
        poll_interval_ms: Some(10),
        max_poll_attempts: Some(5),
        listen_addr: None,
    };
    AppState::new(Relay::from_config(&config))
}

async fn post_diagnose(state: AppState, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/diagnose")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response: Response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_new_conversation_returns_assistant_reply() {
    let calls = Arc::new(Calls::default());
    let addr = spawn_fake_api(assistants_api(calls.clone())).await;

    let (status, body) = post_diagnose(
        relay_state(addr),
        json!({"message": "Chiado agudo ao frear"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "threadId": "thread_new",
            "response": "Verifique as pastilhas de freio.",
            "messageId": "msg_reply"
        })
    );
    assert_eq!(calls.threads.load(Ordering::SeqCst), 1);
    assert_eq!(calls.status_checks.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_existing_thread_is_reused() {
    let calls = Arc::new(Calls::default());
    let addr = spawn_fake_api(assistants_api(calls.clone())).await;

    let (status, body) = post_diagnose(
        relay_state(addr),
        json!({"message": "E agora faz barulho", "threadId": "thread_existing"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["threadId"], "thread_existing");
    assert_eq!(calls.threads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upstream_rejection_is_reported_with_stage_and_status() {
    let rejecting = Router::new().route(
        "/v1/threads",
        post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"}))) }),
    );
    let addr = spawn_fake_api(rejecting).await;

    let (status, body) = post_diagnose(relay_state(addr), json!({"message": "motor falhando"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to create thread: 401"}));
}

#[tokio::test]
async fn test_run_that_never_finishes_times_out() {
    let stuck = Router::new()
        .route("/v1/threads/:thread_id/messages", post(append_message))
        .route("/v1/threads/:thread_id/runs", post(create_run))
        .route(
            "/v1/threads/:thread_id/runs/:run_id",
            get(|| async { Json(json!({"id": "run_1", "status": "in_progress"})) }),
        );
    let addr = spawn_fake_api(stuck).await;

    let (status, body) = post_diagnose(
        relay_state(addr),
        json!({"message": "vibração no volante", "threadId": "thread_1"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Run timed out after 5 status checks"}));
}
