use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use nl_sql::config::AppConfig;
use nl_sql::llm::models::{ChatMessage, Prompt};
use nl_sql::llm::providers::groq::GroqProvider;
use nl_sql::llm::{CompletionClient, LlmError};
use nl_sql::sql::build_prompt;

#[derive(Default)]
struct Captured {
    authorization: Option<String>,
    body: Option<Value>,
}

type Shared = Arc<Mutex<Captured>>;

/// Serves `reply` from a local stand-in for the chat completions endpoint and
/// returns its URL.
async fn spawn_upstream(status: StatusCode, reply: Value) -> (String, Shared) {
    let captured: Shared = Arc::default();

    let app = Router::new()
        .route(
            "/openai/v1/chat/completions",
            post(
                move |State(captured): State<Shared>, headers: HeaderMap, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        let mut captured = captured.lock().unwrap();
                        captured.authorization = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        captured.body = Some(body);
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(Arc::clone(&captured));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/openai/v1/chat/completions", addr), captured)
}

fn provider_for(api_url: String) -> GroqProvider {
    let mut config = AppConfig::default().llm;
    config.api_url = api_url;
    GroqProvider::new(&config, "gsk_test_key".to_string()).unwrap()
}

#[tokio::test]
async fn test_completion_request_and_reply() {
    let (url, captured) = spawn_upstream(
        StatusCode::OK,
        json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "SELECT 1" } },
                { "index": 1, "message": { "role": "assistant", "content": "SELECT 2" } }
            ]
        }),
    )
    .await;

    let provider = provider_for(url);
    let content = provider.complete(&build_prompt("count invoices")).await.unwrap();
    assert_eq!(content, "SELECT 1");

    let captured = captured.lock().unwrap();
    assert_eq!(captured.authorization.as_deref(), Some("Bearer gsk_test_key"));

    let body = captured.body.as_ref().unwrap();
    assert_eq!(body["model"], "llama-3.3-70b-versatile");
    assert_eq!(body["max_tokens"], 500);
    assert!((body["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(
        body["messages"][1]["content"],
        "Generate PostgreSQL query for: count invoices"
    );
}

#[tokio::test]
async fn test_error_status_is_response_error() {
    let (url, _) = spawn_upstream(
        StatusCode::UNAUTHORIZED,
        json!({ "error": { "message": "Invalid API Key" } }),
    )
    .await;

    let err = provider_for(url)
        .complete(&Prompt::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    match err {
        LlmError::ResponseError(msg) => {
            assert!(msg.contains("401"), "{msg}");
            assert!(msg.contains("Invalid API Key"), "{msg}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_is_response_error() {
    let (url, _) = spawn_upstream(StatusCode::OK, json!({ "choices": [] })).await;

    let err = provider_for(url)
        .complete(&build_prompt("anything"))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ResponseError(ref m) if m == "No choices in response"));
}

#[tokio::test]
async fn test_null_content_is_response_error() {
    let (url, _) = spawn_upstream(
        StatusCode::OK,
        json!({ "choices": [ { "message": { "role": "assistant", "content": null } } ] }),
    )
    .await;

    let err = provider_for(url)
        .complete(&build_prompt("anything"))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ResponseError(_)));
}

#[tokio::test]
async fn test_unreachable_upstream_is_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider_for(format!("http://{}/openai/v1/chat/completions", addr))
        .complete(&build_prompt("anything"))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ConnectionError(_)));
}
