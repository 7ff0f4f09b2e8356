use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::service::Service;
use super::specialist::Specialist;

/// One booked (or historical) appointment as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub service: Service,
    pub specialist: Specialist,
    pub date: DateTime<Utc>,
    pub time_slot: String,
    pub status: AppointmentStatus,
    pub total_price: f64,
}

/// Appointment status as an open, string-backed set.
///
/// The backend still grows this list (payment states were added after the
/// first release), so an unrecognized value must not fail the record: it is
/// preserved verbatim in `Other` and displayed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
    PendingPayment,
    Paid,
    Failed,
    Refunded,
    Other(String),
}

impl AppointmentStatus {
    /// The wire/display form. `Other` yields the raw value untouched.
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Upcoming => "UPCOMING",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::PendingPayment => "PENDING_PAYMENT",
            AppointmentStatus::Paid => "PAID",
            AppointmentStatus::Failed => "FAILED",
            AppointmentStatus::Refunded => "REFUNDED",
            AppointmentStatus::Other(raw) => raw,
        }
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Upcoming
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for AppointmentStatus {
    fn from(s: &str) -> Self {
        match s {
            "UPCOMING" => AppointmentStatus::Upcoming,
            "COMPLETED" => AppointmentStatus::Completed,
            "CANCELLED" => AppointmentStatus::Cancelled,
            "PENDING_PAYMENT" => AppointmentStatus::PendingPayment,
            "PAID" => AppointmentStatus::Paid,
            "FAILED" => AppointmentStatus::Failed,
            "REFUNDED" => AppointmentStatus::Refunded,
            other => AppointmentStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(s: String) -> Self {
        AppointmentStatus::from(s.as_str())
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.as_str().to_string()
    }
}
