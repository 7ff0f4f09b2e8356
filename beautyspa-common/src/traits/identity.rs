use async_trait::async_trait;

use crate::error::Error;

/// Seam for the federated identity SDK. The SDK is a black box that either
/// yields an opaque id token or fails.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Runs the provider's sign-in flow and returns the opaque id token.
    async fn id_token(&self) -> Result<String, Error>;

    /// Signs out on the provider side and revokes consent. Best-effort:
    /// local session clearing never depends on this succeeding.
    async fn sign_out(&self) -> Result<(), Error>;
}
