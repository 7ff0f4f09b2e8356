// beautyspa-core/src/auth/manager.rs

use std::sync::Arc;

use tracing::info;

use beautyspa_common::Error;
use beautyspa_common::models::AuthResponse;
use beautyspa_common::traits::{BookingBackend, IdentityProvider};

use super::session::SessionStore;

/// Drives federated sign-in end to end: identity SDK, then the token
/// exchange, then session persistence.
pub struct AuthManager {
    api: Arc<dyn BookingBackend>,
    session: Arc<SessionStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl AuthManager {
    pub fn new(
        api: Arc<dyn BookingBackend>,
        session: Arc<SessionStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            api,
            session,
            identity,
        }
    }

    /// Runs the sign-in flow. Identity-SDK and exchange failures propagate
    /// with a display-ready message; a 2xx exchange that carries no token
    /// is rejected rather than silently leaving the session unauthenticated.
    pub async fn sign_in(&self) -> Result<AuthResponse, Error> {
        let id_token = self.identity.id_token().await?;
        let response = self.api.google_sign_in(&id_token).await?;
        if response.token.is_empty() {
            return Err(Error::Auth(
                "Login failed: no token received from server".to_string(),
            ));
        }
        self.session.save(&response.token)?;
        info!("signed in");
        Ok(response)
    }

    /// Clears the local session (and, best-effort, the identity SDK's).
    pub fn sign_out(&self) {
        self.session.clear();
        info!("signed out");
    }
}
