use async_trait::async_trait;

use crate::models::PaymentOutcome;

/// Seam for the hosted payment-confirmation SDK. One call presents the
/// confirmation UI for the given client secret and resolves exactly once
/// with the three-way outcome; SDK-level failures arrive as
/// `PaymentOutcome::Failed` with the SDK's reason.
#[async_trait]
pub trait PaymentConfirmer: Send + Sync {
    async fn confirm(&self, client_secret: &str) -> PaymentOutcome;
}
