use std::sync::Arc;

use beautyspa_ai::AssistantClient;
use beautyspa_common::Error;
use beautyspa_common::traits::{IdentityProvider, TokenStorage};

use crate::api::ApiClient;
use crate::auth::{AuthManager, SessionStore};
use crate::booking::BookingCoordinator;
use crate::config::AppConfig;
use crate::profile::ProfileAggregator;

/// Process-wide wiring, built once at startup and handed to the UI shell.
///
/// The session store is constructed here and threaded into every client by
/// `Arc`; nothing holds session state globally.
pub struct AppContext {
    pub config: AppConfig,
    pub session: Arc<SessionStore>,
    pub api: Arc<ApiClient>,
    pub assistant: AssistantClient,
    pub auth: AuthManager,
    pub profile: Arc<ProfileAggregator>,
}

impl AppContext {
    pub fn initialize(
        config: AppConfig,
        storage: Box<dyn TokenStorage>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, Error> {
        let session = Arc::new(SessionStore::new(storage, Some(identity.clone())));
        let api = Arc::new(ApiClient::new(&config, session.clone())?);
        let assistant = AssistantClient::new(&config.api_base, session.clone())?;
        let auth = AuthManager::new(api.clone(), session.clone(), identity);
        let profile = Arc::new(ProfileAggregator::new(api.clone()));
        Ok(Self {
            config,
            session,
            api,
            assistant,
            auth,
            profile,
        })
    }

    /// A fresh coordinator for one booking session. Selection state is
    /// never shared between sessions.
    pub fn new_booking(&self, user_id: impl Into<String>) -> BookingCoordinator {
        BookingCoordinator::new(
            self.api.clone(),
            self.profile.clone(),
            user_id,
            self.config.currency.clone(),
        )
    }
}
