use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side record of an authorized pending charge, paired with the
/// client secret that unlocks exactly one confirmation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub appointment_draft_id: String,
    pub amount: f64,
    pub currency: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /api/payments/intents`. `date` is pre-formatted
/// ISO-8601 by the caller; the idempotency key, when set, is mirrored into
/// the `Idempotency-Key` header by the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub user_id: String,
    pub service_id: String,
    pub specialist_id: String,
    pub date: String,
    pub time_slot: String,
    pub amount: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// Three-way result of one hosted payment-confirmation presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Completed,
    Canceled,
    Failed(String),
}

/// Terminal record of a booking attempt, surfaced to the UI until it is
/// explicitly cleared. A user cancel leaves no resolution behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentResolution {
    Completed,
    Failed(String),
}
