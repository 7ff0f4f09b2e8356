use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use beautyspa_common::Error;
use beautyspa_common::models::{BookingState, ChatResponse};
use beautyspa_common::traits::TokenSource;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for `POST /api/assistant/step`.
///
/// Every code path returns a `ChatResponse` the UI can render directly; the
/// only hard failure is constructing the client itself.
pub struct AssistantClient {
    http: Client,
    endpoint: String,
    session: Arc<dyn TokenSource>,
}

impl AssistantClient {
    pub fn new(base_url: &str, session: Arc<dyn TokenSource>) -> Result<Self, Error> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/assistant/step", base_url.trim_end_matches('/')),
            session,
        })
    }

    /// Sends one user turn. Requires a valid session: without one the auth
    /// prompt is produced locally and no request goes out.
    pub async fn ask(&self, message: &str) -> ChatResponse {
        let Some(token) = self.session.valid_token() else {
            debug!("assistant turn without a session, answering locally");
            return ChatResponse::local("Authentication required. Please log in.");
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .bearer_auth(&token)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("assistant request failed: {e}");
                return ChatResponse::local(format!("Network error: {e}"));
            }
        };

        let status = response.status();
        let raw = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("assistant body read failed: {e}");
                return ChatResponse::local(format!("Network error: {e}"));
            }
        };

        if !status.is_success() {
            warn!("assistant endpoint answered HTTP {}", status.as_u16());
            return ChatResponse::local(format!("Server error ({})", status.as_u16()));
        }
        if raw.trim().is_empty() {
            return ChatResponse::local("Empty response");
        }

        parse_reply(&raw)
    }
}

/// Maps whatever the backend sent into a displayable reply.
///
/// Preferred shape is `{ message, state? }` with `answer` as a legacy
/// message field. Non-object bodies never fail: an array yields its first
/// string element, anything else comes back as the raw text.
fn parse_reply(raw: &str) -> ChatResponse {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(obj)) => {
            let state = obj
                .get("state")
                .and_then(|s| serde_json::from_value::<BookingState>(s.clone()).ok())
                .map(BookingState::normalized);
            let message = obj
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .or_else(|| obj.get("answer").and_then(Value::as_str).filter(|m| !m.is_empty()))
                .unwrap_or("No message")
                .to_string();
            ChatResponse { message, state }
        }
        Ok(Value::Array(items)) => {
            let first = items
                .iter()
                .find_map(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| raw.to_string());
            ChatResponse::local(first)
        }
        _ => ChatResponse::local(raw),
    }
}
