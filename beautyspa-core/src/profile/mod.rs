// =============================================================================
// beautyspa-core/src/profile/mod.rs
// =============================================================================

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use beautyspa_common::models::{Appointment, AppointmentStatus, User};
use beautyspa_common::traits::{AppointmentQuery, BookingBackend};

#[derive(Default)]
struct ProfileState {
    user: Option<User>,
    appointments: Vec<Appointment>,
}

/// Aggregates the signed-in user's profile with their appointment history
/// and partitions it into the "upcoming" and "past" views.
pub struct ProfileAggregator {
    api: Arc<dyn BookingBackend>,
    state: RwLock<ProfileState>,
}

impl ProfileAggregator {
    pub fn new(api: Arc<dyn BookingBackend>) -> Self {
        Self {
            api,
            state: RwLock::new(ProfileState::default()),
        }
    }

    /// Fetches the current user and, only when one was found, that user's
    /// appointments. No authenticated user yields an empty history without
    /// touching the appointments endpoint.
    pub async fn refresh(&self) {
        let user = self.api.fetch_user().await;
        let appointments = match &user {
            Some(user) => {
                self.api
                    .fetch_appointments(AppointmentQuery::for_user(&user.id))
                    .await
            }
            None => {
                debug!("no authenticated user, skipping appointment fetch");
                Vec::new()
            }
        };
        let mut state = self.state.write().await;
        state.user = user;
        state.appointments = appointments;
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn appointments(&self) -> Vec<Appointment> {
        self.state.read().await.appointments.clone()
    }

    /// Still-pending appointments dated in the future.
    pub async fn upcoming(&self) -> Vec<Appointment> {
        filter_upcoming(&self.state.read().await.appointments, Utc::now())
    }

    /// Settled appointments, plus anything already dated at or before now.
    pub async fn past(&self) -> Vec<Appointment> {
        filter_past(&self.state.read().await.appointments, Utc::now())
    }

    /// Locally flags the most recently dated appointment as paid, bridging
    /// the gap until the next refresh replaces it with server truth.
    pub async fn mark_latest_paid(&self) {
        let mut state = self.state.write().await;
        if let Some(latest) = state
            .appointments
            .iter_mut()
            .max_by_key(|appointment| appointment.date)
        {
            latest.status = AppointmentStatus::Paid;
        }
    }

    /// Drops all profile state. Used on logout.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.user = None;
        state.appointments.clear();
    }
}

// The two filters deliberately overlap rather than partitioning: an
// appointment that is still UPCOMING but dated in the past shows up in
// "past" only, via the date clause.

fn filter_upcoming(items: &[Appointment], now: DateTime<Utc>) -> Vec<Appointment> {
    items
        .iter()
        .filter(|a| {
            matches!(
                a.status,
                AppointmentStatus::Upcoming | AppointmentStatus::Paid
            ) && a.date > now
        })
        .cloned()
        .collect()
}

fn filter_past(items: &[Appointment], now: DateTime<Utc>) -> Vec<Appointment> {
    items
        .iter()
        .filter(|a| {
            matches!(
                a.status,
                AppointmentStatus::Completed
                    | AppointmentStatus::Cancelled
                    | AppointmentStatus::Failed
                    | AppointmentStatus::Refunded
            ) || a.date <= now
        })
        .cloned()
        .collect()
}
