use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use tracing::debug;

use beautyspa_common::Error;
use beautyspa_common::traits::{IdentityProvider, TokenSource, TokenStorage};

/// Owns the session token lifecycle: persistence, expiry gating, and
/// invalidation. Constructed once at startup and shared by `Arc` with every
/// client that attaches credentials.
pub struct SessionStore {
    storage: Box<dyn TokenStorage>,
    identity: Option<Arc<dyn IdentityProvider>>,
}

impl SessionStore {
    pub fn new(
        storage: Box<dyn TokenStorage>,
        identity: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        Self { storage, identity }
    }

    /// Persists a token, overwriting any prior value.
    pub fn save(&self, token: &str) -> Result<(), Error> {
        self.storage.store(token)
    }

    /// The raw stored token, with no expiry check.
    pub fn get(&self) -> Option<String> {
        self.storage.load()
    }

    /// The stored token, unless its `exp` claim is at or before now; in
    /// that case the token is purged and `None` comes back. Tokens whose
    /// payload cannot be decoded, or which carry no `exp`, pass through
    /// untouched.
    pub fn get_valid(&self) -> Option<String> {
        let token = self.storage.load()?;
        if token_expired(&token, Utc::now()) {
            debug!("session token expired, purging");
            self.storage.clear();
            return None;
        }
        Some(token)
    }

    /// Removes the token and, best-effort, asks the identity SDK to sign
    /// out and revoke consent. The local clear never waits on the SDK and
    /// swallows its failures.
    pub fn clear(&self) {
        self.storage.clear();
        if let Some(identity) = self.identity.clone() {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        if let Err(e) = identity.sign_out().await {
                            debug!("identity sign-out failed: {e}");
                        }
                    });
                }
                Err(_) => debug!("no async runtime, skipping identity sign-out"),
            }
        }
    }
}

impl TokenSource for SessionStore {
    fn valid_token(&self) -> Option<String> {
        self.get_valid()
    }
}

fn token_expired(token: &str, now: DateTime<Utc>) -> bool {
    match expiry_claim(token) {
        Some(exp) => exp <= now.timestamp(),
        None => false,
    }
}

/// Pulls the `exp` claim (seconds since epoch) out of a JWT-style token
/// without verifying the signature. Accepts standard base64 as well as
/// base64url; real-world tokens vary.
fn expiry_claim(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .ok()
        .or_else(|| STANDARD.decode(payload).ok())?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::storage::MemoryTokenStorage;

    fn jwt_with_exp(exp: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{exp}}}"#));
        format!("hdr.{payload}.sig")
    }

    fn store() -> SessionStore {
        SessionStore::new(Box::new(MemoryTokenStorage::default()), None)
    }

    #[test]
    fn valid_token_comes_back() {
        let session = store();
        let token = jwt_with_exp(Utc::now().timestamp() + 3600);
        session.save(&token).unwrap();
        assert_eq!(session.get_valid(), Some(token));
    }

    #[test]
    fn expired_token_is_purged() {
        let session = store();
        let token = jwt_with_exp(Utc::now().timestamp() - 1);
        session.save(&token).unwrap();
        assert_eq!(session.get_valid(), None);
        // Purged, not just filtered: the raw read is empty too.
        assert_eq!(session.get(), None);
        assert_eq!(session.get_valid(), None);
    }

    #[test]
    fn exp_exactly_now_counts_as_expired() {
        let now = Utc::now();
        assert!(token_expired(&jwt_with_exp(now.timestamp()), now));
    }

    #[test]
    fn undecodable_token_is_treated_as_valid() {
        let session = store();
        session.save("not-a-jwt-at-all").unwrap();
        assert_eq!(session.get_valid().as_deref(), Some("not-a-jwt-at-all"));
    }

    #[test]
    fn token_without_exp_claim_is_treated_as_valid() {
        let session = store();
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"u1"}"#);
        let token = format!("hdr.{payload}.sig");
        session.save(&token).unwrap();
        assert_eq!(session.get_valid(), Some(token));
    }

    #[test]
    fn standard_base64_payload_is_accepted() {
        let exp = Utc::now().timestamp() + 3600;
        let payload = STANDARD.encode(format!(r#"{{"exp":{exp}}}"#));
        assert_eq!(expiry_claim(&format!("hdr.{payload}.sig")), Some(exp));
    }

    #[test]
    fn save_overwrites_previous_token() {
        let session = store();
        session.save("first").unwrap();
        session.save("second").unwrap();
        assert_eq!(session.get().as_deref(), Some("second"));
    }

    #[test]
    fn clear_removes_the_token() {
        let session = store();
        session.save("tok").unwrap();
        session.clear();
        assert_eq!(session.get(), None);
    }
}
