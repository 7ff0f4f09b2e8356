// File: beautyspa-common/src/traits/api.rs

use async_trait::async_trait;

use crate::error::Error;
use crate::models::{
    Appointment, AuthResponse, PaymentIntent, PaymentIntentRequest, Service, ServiceCategory,
    Specialist, User,
};

/// Filters for `GET /api/services`.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub category: Option<ServiceCategory>,
    pub featured: Option<bool>,
}

/// Filters for `GET /api/specialists`.
#[derive(Debug, Clone, Default)]
pub struct SpecialistFilter {
    pub specialty: Option<String>,
    pub min_rating: Option<f32>,
}

/// Query for the appointment list endpoints. With a `user_id` the per-user
/// route is used, otherwise the global one.
#[derive(Debug, Clone)]
pub struct AppointmentQuery {
    pub user_id: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for AppointmentQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            status: None,
            date_from: None,
            date_to: None,
            page: 1,
            page_size: 100,
        }
    }
}

impl AppointmentQuery {
    /// The profile screen's query: one user's full history.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            page_size: 200,
            ..Default::default()
        }
    }
}

/// The backend REST surface the app consumes.
///
/// Read methods degrade (empty/`None`) instead of failing so list screens
/// survive backend hiccups; write methods surface errors with a
/// display-ready message. Implemented by the live `ApiClient`; mocked in
/// tests.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn fetch_services(&self, filter: ServiceFilter) -> Vec<Service>;

    async fn fetch_specialists(&self, filter: SpecialistFilter) -> Vec<Specialist>;

    async fn fetch_appointments(&self, query: AppointmentQuery) -> Vec<Appointment>;

    async fn appointment_detail(&self, id: &str) -> Option<Appointment>;

    /// `POST /api/appointments/{id}/cancel`. A 2xx with an empty body is a
    /// legitimate "nothing to report" answer and maps to `Ok(None)`.
    async fn cancel_appointment(&self, id: &str, refund: bool)
    -> Result<Option<Appointment>, Error>;

    async fn fetch_user(&self) -> Option<User>;

    /// `POST /api/payments/intents`. The idempotency key in the request is
    /// mirrored into the `Idempotency-Key` header when present.
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, Error>;

    /// `POST /api/auth/google`: exchanges a federated id token for our own
    /// bearer token.
    async fn google_sign_in(&self, id_token: &str) -> Result<AuthResponse, Error>;
}
