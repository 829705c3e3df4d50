//! End-to-end tests for the `POST /api/chat` endpoint.
//!
//! The axum app runs on an ephemeral port with mock providers and is driven
//! over real HTTP with reqwest.

use std::sync::Arc;

use analystchat::connector::api::{Container, ContainerConfig};
use analystchat::{
    AppState, ChatResponse, ErrorResponse, MockChatProvider, ProviderSelection, Role,
};
use serde_json::json;
use tokio::net::TcpListener;

async fn spawn_app(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(analystchat::serve(listener, state));
    format!("http://{addr}/api/chat")
}

async fn spawn_with(primary: MockChatProvider, secondary: MockChatProvider) -> String {
    spawn_shared(Arc::new(primary), Arc::new(secondary)).await
}

async fn spawn_shared(primary: Arc<MockChatProvider>, secondary: Arc<MockChatProvider>) -> String {
    let container = Container::with_providers(
        primary,
        secondary,
        ContainerConfig {
            mock_providers: true,
        },
    );
    spawn_app(container.app_state()).await
}

async fn spawn_default() -> String {
    spawn_with(
        MockChatProvider::new(ProviderSelection::Primary),
        MockChatProvider::new(ProviderSelection::Secondary),
    )
    .await
}

#[tokio::test]
async fn test_minimal_request_answers_with_primary() {
    let url = spawn_default().await;

    let response = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "prompt": "hello" }))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 200);
    let body: ChatResponse = response.json().await.expect("json");
    assert!(body.reply.contains("hello"));
    assert_eq!(body.model_used, "mock-primary");
    assert_eq!(body.provider, "OPENAI");
    assert_eq!(body.tokens_used, 15);
}

#[tokio::test]
async fn test_switching_provider_changes_model_used() {
    let url = spawn_default().await;
    let client = reqwest::Client::new();

    let primary: ChatResponse = client
        .post(&url)
        .json(&json!({ "prompt": "hi", "provider": "primary" }))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    let secondary: ChatResponse = client
        .post(&url)
        .json(&json!({ "prompt": "hi", "provider": "secondary" }))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");

    assert_eq!(primary.provider, "OPENAI");
    assert_eq!(secondary.provider, "MISTRAL");
    assert_ne!(primary.model_used, secondary.model_used);
}

#[tokio::test]
async fn test_reply_and_summed_token_count() {
    let url = spawn_with(
        MockChatProvider::new(ProviderSelection::Primary)
            .with_reply("ok")
            .with_usage(5, 3, None),
        MockChatProvider::new(ProviderSelection::Secondary),
    )
    .await;

    let body: ChatResponse = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "prompt": "hi" }))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");

    assert_eq!(body.reply, "ok");
    assert_eq!(body.tokens_used, 8);
}

#[tokio::test]
async fn test_provider_failure_returns_generic_500() {
    let url = spawn_with(
        MockChatProvider::new(ProviderSelection::Primary),
        MockChatProvider::new(ProviderSelection::Secondary).failing(),
    )
    .await;

    let response = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "prompt": "hi", "provider": "mistral" }))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 500);
    let body: ErrorResponse = response.json().await.expect("json");
    assert_eq!(body.error, "Error calling MISTRAL");
    assert!(!body.error.contains("simulated"));
}

#[tokio::test]
async fn test_blank_prompt_is_rejected_with_400() {
    let url = spawn_default().await;

    let response = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "prompt": "   ", "provider": "secondary" }))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 400);
    let body: ErrorResponse = response.json().await.expect("json");
    assert!(body.error.contains("MISTRAL"));
}

#[tokio::test]
async fn test_missing_prompt_is_rejected_with_400() {
    let url = spawn_default().await;

    let response = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "messages": [] }))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_unknown_provider_falls_back_to_primary() {
    let url = spawn_default().await;

    let body: ChatResponse = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "prompt": "hi", "provider": "somebody-else" }))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");

    assert_eq!(body.provider, "OPENAI");
}

#[tokio::test]
async fn test_full_request_with_history_and_task_guidance() {
    let primary = Arc::new(MockChatProvider::new(ProviderSelection::Primary).recording());
    let url = spawn_shared(
        primary.clone(),
        Arc::new(MockChatProvider::new(ProviderSelection::Secondary)),
    )
    .await;

    let history: Vec<_> = (0..14)
        .map(|i| {
            json!({
                "type": if i % 2 == 0 { "user" } else { "ai" },
                "content": format!("turn {i}"),
                "timestamp": "12:00"
            })
        })
        .collect();

    let response = reqwest::Client::new()
        .post(&url)
        .json(&json!({
            "prompt": "what next?",
            "messages": history,
            "provider": "primary",
            "isTaskGuidanceActive": true,
            "activeTask": "Add a newsletter signup"
        }))
        .send()
        .await
        .expect("send");

    assert_eq!(response.status(), 200);

    let sent = primary.last_messages().expect("primary was called");
    // system, last 10 turns, prompt; no grounding since no keyword appears
    assert_eq!(sent.len(), 12);
    assert_eq!(sent[0].role(), Role::System);
    assert!(sent[0].content().contains("Add a newsletter signup"));

    let window: Vec<&str> = sent[1..11].iter().map(|m| m.content()).collect();
    let expected: Vec<String> = (4..14).map(|i| format!("turn {i}")).collect();
    assert_eq!(window, expected);
    assert_eq!(sent[1].role(), Role::User);
    assert_eq!(sent[2].role(), Role::Assistant);
    assert_eq!(sent[11].content(), "what next?");
}

#[tokio::test]
async fn test_malformed_body_is_a_client_error() {
    let url = spawn_default().await;

    let response = reqwest::Client::new()
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("send");

    assert!(response.status().is_client_error());
}
