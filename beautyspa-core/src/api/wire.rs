//! JSON shapes for the backend REST surface, and their mapping into domain
//! models. Shapes are deliberately permissive (`#[serde(default)]`
//! everywhere): a record that is missing required pieces maps to `None` and
//! is skipped by the caller, it never fails a whole response.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;

use beautyspa_common::models::{
    Appointment, AppointmentStatus, AuthResponse, PaymentIntent, Service, Specialist, User,
    UserPreferences,
};

/// `yyyy-MM-ddTHH:mm:ssZ`, with a date-only fallback. `None` for anything
/// else; callers substitute "now" where the record should survive anyway.
pub(crate) fn parse_iso_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%SZ") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ServiceJson {
    id: String,
    name: String,
    description: String,
    category: String,
    duration: u32,
    price: f64,
    image_url: String,
    rating: f64,
    review_count: u32,
    is_featured: bool,
}

impl ServiceJson {
    pub(crate) fn into_service(self) -> Option<Service> {
        if self.id.is_empty() || self.name.is_empty() {
            return None;
        }
        Some(Service {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category.parse().unwrap_or_default(),
            duration_minutes: self.duration,
            price: self.price,
            image_url: self.image_url,
            rating: self.rating as f32,
            review_count: self.review_count,
            is_featured: self.is_featured,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct SpecialistJson {
    id: String,
    name: String,
    specialty: String,
    image_url: String,
    rating: f64,
    experience_years: u32,
}

impl SpecialistJson {
    pub(crate) fn into_specialist(self) -> Option<Specialist> {
        if self.id.is_empty() || self.name.is_empty() {
            return None;
        }
        Some(Specialist {
            id: self.id,
            name: self.name,
            specialty: self.specialty,
            image_url: self.image_url,
            rating: self.rating as f32,
            experience_years: self.experience_years,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PreferencesJson {
    fav_specialty: String,
    receive_promotions: Option<bool>,
    preferred_language: String,
}

impl PreferencesJson {
    fn into_preferences(self) -> UserPreferences {
        UserPreferences {
            fav_specialty: self.fav_specialty,
            receive_promotions: self.receive_promotions.unwrap_or(true),
            preferred_language: if self.preferred_language.is_empty() {
                "en".to_string()
            } else {
                self.preferred_language
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct UserJson {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    membership_level: String,
    loyalty_points: u32,
    preferences: Option<PreferencesJson>,
    profile_image_url: String,
}

impl UserJson {
    pub(crate) fn into_user(self) -> Option<User> {
        if self.id.is_empty() {
            return None;
        }
        Some(User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            membership_level: if self.membership_level.is_empty() {
                "BRONZE".to_string()
            } else {
                self.membership_level
            },
            loyalty_points: self.loyalty_points,
            preferences: self
                .preferences
                .map(PreferencesJson::into_preferences)
                .unwrap_or_default(),
            profile_image_url: self.profile_image_url,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct AppointmentJson {
    id: String,
    service: Option<ServiceJson>,
    specialist: Option<SpecialistJson>,
    date: String,
    time_slot: String,
    status: String,
    total_price: f64,
}

impl AppointmentJson {
    pub(crate) fn into_appointment(self) -> Option<Appointment> {
        if self.id.is_empty() || self.date.is_empty() {
            return None;
        }
        let service = self.service.and_then(ServiceJson::into_service)?;
        let specialist = self.specialist.and_then(SpecialistJson::into_specialist)?;
        // An unparseable (but present) date degrades to "now" so the record
        // itself survives.
        let date = parse_iso_date(&self.date).unwrap_or_else(Utc::now);
        let status = if self.status.is_empty() {
            AppointmentStatus::Upcoming
        } else {
            AppointmentStatus::from(self.status.as_str())
        };
        Some(Appointment {
            id: self.id,
            service,
            specialist,
            date,
            time_slot: self.time_slot,
            status,
            total_price: self.total_price,
        })
    }
}

/// Appointment list page: `{ items: [...] }`, with the legacy `{ data:
/// [...] }` shape still accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AppointmentPageJson {
    items: Option<Vec<AppointmentJson>>,
    data: Option<Vec<AppointmentJson>>,
}

impl AppointmentPageJson {
    pub(crate) fn rows(self) -> Vec<AppointmentJson> {
        self.items.or(self.data).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PaymentIntentJson {
    client_secret: String,
    payment_intent_id: String,
    appointment_draft_id: String,
    amount: Option<f64>,
    currency: String,
    expires_at: String,
}

impl PaymentIntentJson {
    /// Missing amount/currency fall back to what we asked for.
    pub(crate) fn into_intent(self, requested_amount: f64, requested_currency: &str) -> PaymentIntent {
        PaymentIntent {
            client_secret: self.client_secret,
            payment_intent_id: self.payment_intent_id,
            appointment_draft_id: self.appointment_draft_id,
            amount: self.amount.unwrap_or(requested_amount),
            currency: if self.currency.is_empty() {
                requested_currency.to_string()
            } else {
                self.currency
            },
            expires_at: if self.expires_at.is_empty() {
                None
            } else {
                parse_iso_date(&self.expires_at)
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct AuthResponseJson {
    token: String,
    expires_in: String,
    user: Option<UserJson>,
}

impl AuthResponseJson {
    pub(crate) fn into_auth_response(self) -> AuthResponse {
        AuthResponse {
            token: self.token,
            expires_in: self.expires_in,
            user: self.user.and_then(UserJson::into_user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beautyspa_common::models::ServiceCategory;

    #[test]
    fn parses_full_iso_dates() {
        let dt = parse_iso_date("2025-12-01T10:30:00Z").expect("full ISO should parse");
        assert_eq!(dt.to_rfc3339(), "2025-12-01T10:30:00+00:00");
    }

    #[test]
    fn parses_date_only_values_at_midnight() {
        let dt = parse_iso_date("2025-12-01").expect("date-only should parse");
        assert_eq!(dt.to_rfc3339(), "2025-12-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_iso_date("next tuesday"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn service_mapping_skips_records_without_id_or_name() {
        let missing_id: ServiceJson =
            serde_json::from_str(r#"{"name":"Swedish Massage"}"#).unwrap();
        assert!(missing_id.into_service().is_none());

        let missing_name: ServiceJson = serde_json::from_str(r#"{"id":"s1"}"#).unwrap();
        assert!(missing_name.into_service().is_none());
    }

    #[test]
    fn unknown_category_falls_back_to_massage() {
        let json: ServiceJson = serde_json::from_str(
            r#"{"id":"s1","name":"Mystery","category":"CRYOTHERAPY"}"#,
        )
        .unwrap();
        let service = json.into_service().unwrap();
        assert_eq!(service.category, ServiceCategory::Massage);
    }

    #[test]
    fn appointment_with_unparseable_date_survives_as_now() {
        let json: AppointmentJson = serde_json::from_str(
            r#"{
                "id": "a1",
                "service": {"id":"s1","name":"Facial","category":"FACIAL"},
                "specialist": {"id":"p1","name":"Dana"},
                "date": "soonish",
                "status": "PAID"
            }"#,
        )
        .unwrap();
        let before = Utc::now();
        let appointment = json.into_appointment().expect("record should survive");
        assert!(appointment.date >= before);
        assert_eq!(appointment.status, AppointmentStatus::Paid);
    }

    #[test]
    fn appointment_without_date_is_dropped() {
        let json: AppointmentJson = serde_json::from_str(
            r#"{
                "id": "a1",
                "service": {"id":"s1","name":"Facial"},
                "specialist": {"id":"p1","name":"Dana"}
            }"#,
        )
        .unwrap();
        assert!(json.into_appointment().is_none());
    }

    #[test]
    fn page_prefers_items_over_legacy_data() {
        let page: AppointmentPageJson =
            serde_json::from_str(r#"{"items":[],"data":[{"id":"x"}]}"#).unwrap();
        assert!(page.rows().is_empty());

        let legacy: AppointmentPageJson = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(legacy.rows().is_empty());
    }

    #[test]
    fn user_defaults_fill_in() {
        let json: UserJson = serde_json::from_str(r#"{"id":"u1","firstName":"Ada"}"#).unwrap();
        let user = json.into_user().unwrap();
        assert_eq!(user.membership_level, "BRONZE");
        assert!(user.preferences.receive_promotions);
        assert_eq!(user.preferences.preferred_language, "en");
    }

    #[test]
    fn intent_falls_back_to_requested_amount_and_currency() {
        let json: PaymentIntentJson =
            serde_json::from_str(r#"{"clientSecret":"cs_1","paymentIntentId":"pi_1"}"#).unwrap();
        let intent = json.into_intent(89.99, "usd");
        assert_eq!(intent.amount, 89.99);
        assert_eq!(intent.currency, "usd");
        assert_eq!(intent.expires_at, None);
    }
}
