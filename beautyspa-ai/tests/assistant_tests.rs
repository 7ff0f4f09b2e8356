// beautyspa-ai/tests/assistant_tests.rs
//
// Drives AssistantClient against a local stub of the assistant endpoint.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};

use beautyspa_ai::AssistantClient;
use beautyspa_common::traits::TokenSource;

struct StaticToken(Option<&'static str>);

impl TokenSource for StaticToken {
    fn valid_token(&self) -> Option<String> {
        self.0.map(str::to_string)
    }
}

#[derive(Clone, Default)]
struct Hits(Arc<AtomicUsize>);

async fn serve(app: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn no_session_answers_locally_without_a_request() -> anyhow::Result<()> {
    let hits = Hits::default();
    let app = Router::new()
        .route(
            "/api/assistant/step",
            post(|State(hits): State<Hits>| async move {
                hits.0.fetch_add(1, Ordering::SeqCst);
                Json(serde_json::json!({ "message": "should never be reached" }))
            }),
        )
        .with_state(hits.clone());
    let base = serve(app).await?;

    let client = AssistantClient::new(&base, Arc::new(StaticToken(None)))?;
    let reply = client.ask("book me a massage").await;

    assert_eq!(reply.message, "Authentication required. Please log in.");
    assert_eq!(reply.state, None);
    assert_eq!(hits.0.load(Ordering::SeqCst), 0, "no network call may go out");
    Ok(())
}

#[tokio::test]
async fn success_reply_carries_state_and_bearer_token() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/api/assistant/step",
        post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
            assert_eq!(
                headers.get("authorization").and_then(|v| v.to_str().ok()),
                Some("Bearer tok123")
            );
            assert_eq!(body["message"], "pay please");
            Json(serde_json::json!({
                "message": "Ready to pay",
                "state": { "status": "READY_FOR_PAYMENT", "client_secret": "cs_9" }
            }))
        }),
    );
    let base = serve(app).await?;

    let client = AssistantClient::new(&base, Arc::new(StaticToken(Some("tok123"))))?;
    let reply = client.ask("pay please").await;

    assert_eq!(reply.message, "Ready to pay");
    let state = reply.state.expect("state expected");
    assert!(state.is_ready_for_payment());
    assert_eq!(state.client_secret.as_deref(), Some("cs_9"));
    Ok(())
}

#[tokio::test]
async fn server_error_becomes_a_displayable_message() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/api/assistant/step",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = serve(app).await?;

    let client = AssistantClient::new(&base, Arc::new(StaticToken(Some("tok123"))))?;
    let reply = client.ask("hello").await;

    assert_eq!(reply.message, "Server error (500)");
    assert_eq!(reply.state, None);
    Ok(())
}

#[tokio::test]
async fn empty_body_becomes_the_empty_response_message() -> anyhow::Result<()> {
    let app = Router::new().route("/api/assistant/step", post(|| async { "" }));
    let base = serve(app).await?;

    let client = AssistantClient::new(&base, Arc::new(StaticToken(Some("tok123"))))?;
    let reply = client.ask("hello").await;

    assert_eq!(reply.message, "Empty response");
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_becomes_a_network_error_message() -> anyhow::Result<()> {
    // Nothing is listening on this port.
    let client = AssistantClient::new(
        "http://127.0.0.1:1",
        Arc::new(StaticToken(Some("tok123"))),
    )?;
    let reply = client.ask("hello").await;

    assert!(
        reply.message.starts_with("Network error:"),
        "got: {}",
        reply.message
    );
    Ok(())
}
