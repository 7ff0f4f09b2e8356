use crate::error::Error;

/// Local key-value persistence for the session token. Synchronous by
/// design: implementations are on-device stores, never network calls.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<String>;

    fn store(&self, token: &str) -> Result<(), Error>;

    fn clear(&self);
}

/// Read side of the session for client crates: a bearer credential, if a
/// non-expired token is on hand.
pub trait TokenSource: Send + Sync {
    fn valid_token(&self) -> Option<String>;
}
