use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{info, warn};

use beautyspa_common::Error;
use beautyspa_common::models::{
    Appointment, AuthResponse, PaymentIntent, PaymentIntentRequest, Service, Specialist, User,
};
use beautyspa_common::traits::{
    AppointmentQuery, BookingBackend, ServiceFilter, SpecialistFilter,
};

use crate::auth::SessionStore;
use crate::config::AppConfig;

use super::wire::{
    AppointmentJson, AppointmentPageJson, AuthResponseJson, PaymentIntentJson, ServiceJson,
    SpecialistJson, UserJson,
};

/// Typed client for the spa backend's REST surface.
///
/// Read endpoints degrade to empty/`None` on any failure (the screens stay
/// up through backend hiccups); write endpoints propagate errors carrying
/// the HTTP status and the server's `message` field when it sent one.
pub struct ApiClient {
    http: Client,
    base: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Result<Self, Error> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base: config.api_base.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Attaches the bearer credential when a valid session token exists.
    /// Its absence never blocks the call; the server may still answer 401.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.get_valid() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Runs a degradable read. Transport failures, non-2xx statuses, and
    /// unreadable bodies all log and yield `None`.
    async fn read_ok_body(&self, request: RequestBuilder, what: &str) -> Option<String> {
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("{what}: request failed: {e}");
                return None;
            }
        };
        let status = response.status();
        if !status.is_success() {
            warn!("{what}: HTTP {}", status.as_u16());
            return None;
        }
        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("{what}: reading body failed: {e}");
                None
            }
        }
    }

    /// Error for a non-2xx write response, picking up the server's
    /// `message` field when the body carries one.
    fn status_error(code: u16, raw: &str) -> Error {
        let message = serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.is_empty());
        Error::http_status(code, message)
    }
}

#[async_trait]
impl BookingBackend for ApiClient {
    async fn fetch_services(&self, filter: ServiceFilter) -> Vec<Service> {
        let mut request = self.http.get(self.url("/api/services"));
        if let Some(category) = filter.category {
            request = request.query(&[("category", category.as_query())]);
        }
        if let Some(featured) = filter.featured {
            request = request.query(&[("featured", featured.to_string())]);
        }
        let Some(raw) = self.read_ok_body(request, "fetch_services").await else {
            return Vec::new();
        };
        let rows: Vec<ServiceJson> = match serde_json::from_str(&raw) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("fetch_services: unexpected body shape: {e}");
                return Vec::new();
            }
        };
        rows.into_iter().filter_map(ServiceJson::into_service).collect()
    }

    async fn fetch_specialists(&self, filter: SpecialistFilter) -> Vec<Specialist> {
        let mut request = self.http.get(self.url("/api/specialists"));
        if let Some(specialty) = &filter.specialty {
            if !specialty.is_empty() {
                request = request.query(&[("specialty", specialty.as_str())]);
            }
        }
        if let Some(min_rating) = filter.min_rating {
            request = request.query(&[("minRating", min_rating.to_string())]);
        }
        let Some(raw) = self.read_ok_body(request, "fetch_specialists").await else {
            return Vec::new();
        };
        let rows: Vec<SpecialistJson> = match serde_json::from_str(&raw) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("fetch_specialists: unexpected body shape: {e}");
                return Vec::new();
            }
        };
        rows.into_iter()
            .filter_map(SpecialistJson::into_specialist)
            .collect()
    }

    async fn fetch_appointments(&self, query: AppointmentQuery) -> Vec<Appointment> {
        let path = match &query.user_id {
            Some(user_id) => format!("/api/users/{user_id}/appointments"),
            None => "/api/appointments".to_string(),
        };
        let mut request = self
            .http
            .get(self.url(&path))
            .query(&[("page", query.page.to_string())])
            .query(&[("pageSize", query.page_size.to_string())]);
        if let Some(status) = &query.status {
            if !status.is_empty() {
                request = request.query(&[("status", status.as_str())]);
            }
        }
        if let Some(date_from) = &query.date_from {
            request = request.query(&[("dateFrom", date_from.as_str())]);
        }
        if let Some(date_to) = &query.date_to {
            request = request.query(&[("dateTo", date_to.as_str())]);
        }
        let request = self.authorize(request);
        let Some(raw) = self.read_ok_body(request, "fetch_appointments").await else {
            return Vec::new();
        };
        let page: AppointmentPageJson = match serde_json::from_str(&raw) {
            Ok(page) => page,
            Err(e) => {
                warn!("fetch_appointments: unexpected body shape: {e}");
                return Vec::new();
            }
        };
        page.rows()
            .into_iter()
            .filter_map(AppointmentJson::into_appointment)
            .collect()
    }

    async fn appointment_detail(&self, id: &str) -> Option<Appointment> {
        let request = self.authorize(self.http.get(self.url(&format!("/api/appointments/{id}"))));
        let raw = self.read_ok_body(request, "appointment_detail").await?;
        let json: AppointmentJson = match serde_json::from_str(&raw) {
            Ok(json) => json,
            Err(e) => {
                warn!("appointment_detail: unexpected body shape: {e}");
                return None;
            }
        };
        json.into_appointment()
    }

    async fn cancel_appointment(
        &self,
        id: &str,
        refund: bool,
    ) -> Result<Option<Appointment>, Error> {
        let response = self
            .authorize(
                self.http
                    .post(self.url(&format!("/api/appointments/{id}/cancel"))),
            )
            .json(&serde_json::json!({ "refund": refund }))
            .send()
            .await?;
        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(Self::status_error(status.as_u16(), &raw));
        }
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let json: AppointmentJson = serde_json::from_str(&raw)?;
        match json.into_appointment() {
            Some(appointment) => Ok(Some(appointment)),
            None => Err(Error::Parse(
                "cancel response is missing appointment fields".to_string(),
            )),
        }
    }

    async fn fetch_user(&self) -> Option<User> {
        let request = self.authorize(self.http.get(self.url("/api/user")));
        let raw = self.read_ok_body(request, "fetch_user").await?;
        let json: UserJson = match serde_json::from_str(&raw) {
            Ok(json) => json,
            Err(e) => {
                warn!("fetch_user: unexpected body shape: {e}");
                return None;
            }
        };
        json.into_user()
    }

    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, Error> {
        let mut builder = self
            .authorize(self.http.post(self.url("/api/payments/intents")))
            .json(&request);
        // The key rides in the payload and is mirrored as a header so the
        // backend can dedupe at either layer.
        if let Some(key) = &request.idempotency_key {
            builder = builder.header("Idempotency-Key", key);
        }
        let response = builder.send().await?;
        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(Self::status_error(status.as_u16(), &raw));
        }
        if raw.trim().is_empty() {
            return Err(Error::Parse(
                "empty response when creating payment intent".to_string(),
            ));
        }
        let json: PaymentIntentJson = serde_json::from_str(&raw)?;
        let intent = json.into_intent(request.amount, &request.currency);
        info!(intent = %intent.payment_intent_id, "payment intent created");
        Ok(intent)
    }

    async fn google_sign_in(&self, id_token: &str) -> Result<AuthResponse, Error> {
        let response = self
            .http
            .post(self.url("/api/auth/google"))
            .json(&serde_json::json!({ "idToken": id_token }))
            .send()
            .await?;
        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(Self::status_error(status.as_u16(), &raw));
        }
        let json: AuthResponseJson = serde_json::from_str(&raw)?;
        Ok(json.into_auth_response())
    }
}
