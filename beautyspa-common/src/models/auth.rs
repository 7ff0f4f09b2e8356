use serde::{Deserialize, Serialize};

use super::user::User;

/// Body of the `POST /api/auth/google` exchange: our own bearer token plus
/// the profile the backend resolved for the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_in: String,
    pub user: Option<User>,
}
