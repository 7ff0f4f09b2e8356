use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use beautyspa_common::Error;
use beautyspa_common::models::{
    BookingState, PaymentIntent, PaymentIntentRequest, PaymentOutcome, PaymentResolution, Service,
    Specialist,
};
use beautyspa_common::traits::{BookingBackend, PaymentConfirmer, ServiceFilter, SpecialistFilter};

use crate::profile::ProfileAggregator;

use super::selection::{BookingSelection, default_time_slots};

/// Catalog data backing the booking screen.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub specialists: Vec<Specialist>,
    pub time_slots: Vec<String>,
}

/// Everything needed to confirm one pending payment.
#[derive(Debug, Clone)]
struct PendingIntent {
    client_secret: String,
    payment_intent_id: Option<String>,
    idempotency_key: Option<String>,
}

/// The coordinator's position in the booking flow.
///
/// `Selecting` accumulates choices. `IntentRequested` marks the single
/// in-flight intent request; duplicate triggers bounce off it.
/// `AwaitingConfirmation` holds the intent until the hosted confirmation
/// resolves, after which the phase returns to `Selecting`.
#[derive(Debug, Clone)]
enum Phase {
    Selecting,
    IntentRequested { idempotency_key: String },
    AwaitingConfirmation { pending: PendingIntent },
}

struct CoordinatorState {
    selection: BookingSelection,
    phase: Phase,
    catalog: Catalog,
    catalog_loading: bool,
}

/// Drives one booking session from selection through payment confirmation.
///
/// Each instance owns its selection state exclusively; create a fresh one
/// per booking session. All networked steps run on the async runtime and
/// never hold the state lock across an await of the backend.
pub struct BookingCoordinator {
    api: Arc<dyn BookingBackend>,
    profile: Arc<ProfileAggregator>,
    user_id: String,
    currency: String,
    state: Mutex<CoordinatorState>,
    resolution: Mutex<Option<PaymentResolution>>,
}

impl BookingCoordinator {
    pub fn new(
        api: Arc<dyn BookingBackend>,
        profile: Arc<ProfileAggregator>,
        user_id: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            api,
            profile,
            user_id: user_id.into(),
            currency: currency.into(),
            state: Mutex::new(CoordinatorState {
                selection: BookingSelection::default(),
                phase: Phase::Selecting,
                catalog: Catalog::default(),
                catalog_loading: false,
            }),
            resolution: Mutex::new(None),
        }
    }

    /// Loads services and specialists for the booking screen, plus the
    /// static slot grid. Guarded: a load while one is running returns the
    /// current catalog untouched.
    pub async fn load_catalog(&self) -> Catalog {
        {
            let mut state = self.state.lock().await;
            if state.catalog_loading {
                debug!("catalog load already in flight");
                return state.catalog.clone();
            }
            state.catalog_loading = true;
        }
        let services = self.api.fetch_services(ServiceFilter::default()).await;
        let specialists = self.api.fetch_specialists(SpecialistFilter::default()).await;
        let mut state = self.state.lock().await;
        state.catalog_loading = false;
        state.catalog = Catalog {
            services,
            specialists,
            time_slots: default_time_slots(),
        };
        state.catalog.clone()
    }

    pub async fn select_service(&self, service: Service) {
        self.state.lock().await.selection.service = Some(service);
    }

    pub async fn select_date(&self, date: DateTime<Utc>) {
        self.state.lock().await.selection.date = Some(date);
    }

    pub async fn select_time_slot(&self, time_slot: impl Into<String>) {
        self.state.lock().await.selection.time_slot = Some(time_slot.into());
    }

    pub async fn select_specialist(&self, specialist: Specialist) {
        self.state.lock().await.selection.specialist = Some(specialist);
    }

    pub async fn selection(&self) -> BookingSelection {
        self.state.lock().await.selection.clone()
    }

    pub async fn is_complete(&self) -> bool {
        self.state.lock().await.selection.is_complete()
    }

    /// The client secret of the intent waiting to be confirmed, if any.
    /// The UI watches this to present the hosted confirmation.
    pub async fn pending_client_secret(&self) -> Option<String> {
        match &self.state.lock().await.phase {
            Phase::AwaitingConfirmation { pending } => Some(pending.client_secret.clone()),
            _ => None,
        }
    }

    /// The idempotency key of the current attempt: generated once per
    /// user-initiated trigger and kept for the attempt's whole life, so any
    /// re-send of the same logical request dedupes server-side. Assistant
    /// snapshots carry no key (their intent was created elsewhere).
    pub async fn pending_idempotency_key(&self) -> Option<String> {
        match &self.state.lock().await.phase {
            Phase::IntentRequested { idempotency_key } => Some(idempotency_key.clone()),
            Phase::AwaitingConfirmation { pending } => pending.idempotency_key.clone(),
            Phase::Selecting => None,
        }
    }

    /// The user-triggered "pay" action.
    ///
    /// Exactly one `create_payment_intent` request goes out per trigger,
    /// carrying a key generated once for this attempt; a duplicate trigger
    /// while one is outstanding (or while a confirmation is already
    /// pending) is ignored and returns `Ok(None)`. An incomplete selection
    /// is rejected before any network I/O, naming the first missing field.
    /// Backend errors revert to `Selecting` (selection kept) and propagate
    /// verbatim; nothing retries automatically.
    pub async fn request_payment(&self) -> Result<Option<PaymentIntent>, Error> {
        let (request, idempotency_key) = {
            let mut state = self.state.lock().await;
            match state.phase {
                Phase::Selecting => {}
                _ => {
                    debug!("pay trigger ignored: intent request or confirmation already pending");
                    return Ok(None);
                }
            }
            let (Some(service), Some(date), Some(time_slot), Some(specialist)) = (
                state.selection.service.clone(),
                state.selection.date,
                state.selection.time_slot.clone(),
                state.selection.specialist.clone(),
            ) else {
                let missing = state.selection.first_missing().unwrap_or("service");
                return Err(Error::IncompleteSelection(missing));
            };

            let idempotency_key = Uuid::new_v4().to_string();
            state.phase = Phase::IntentRequested {
                idempotency_key: idempotency_key.clone(),
            };
            let request = PaymentIntentRequest {
                user_id: self.user_id.clone(),
                service_id: service.id,
                specialist_id: specialist.id,
                date: date.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                time_slot,
                amount: service.price,
                currency: self.currency.clone(),
                idempotency_key: Some(idempotency_key.clone()),
            };
            (request, idempotency_key)
        };

        match self.api.create_payment_intent(request).await {
            Ok(intent) => {
                let mut state = self.state.lock().await;
                state.phase = Phase::AwaitingConfirmation {
                    pending: PendingIntent {
                        client_secret: intent.client_secret.clone(),
                        payment_intent_id: Some(intent.payment_intent_id.clone()),
                        idempotency_key: Some(idempotency_key),
                    },
                };
                Ok(Some(intent))
            }
            Err(e) => {
                let mut state = self.state.lock().await;
                state.phase = Phase::Selecting;
                warn!("payment intent request failed: {e}");
                Err(e)
            }
        }
    }

    /// Assistant-driven fast path: a `READY_FOR_PAYMENT` snapshot carries
    /// its own client secret and joins the manual flow at the confirmation
    /// step. Returns whether the snapshot was accepted.
    pub async fn apply_assistant_state(&self, booking_state: &BookingState) -> bool {
        if !booking_state.is_ready_for_payment() {
            return false;
        }
        let Some(client_secret) = booking_state.client_secret.clone() else {
            return false;
        };
        let mut state = self.state.lock().await;
        debug!("assistant snapshot ready for payment, awaiting confirmation");
        state.phase = Phase::AwaitingConfirmation {
            pending: PendingIntent {
                client_secret,
                payment_intent_id: booking_state.payment_intent_id.clone(),
                idempotency_key: None,
            },
        };
        true
    }

    /// Presents the hosted confirmation for the pending intent (at most
    /// once per pending intent) and folds the outcome back into state.
    /// `None` when nothing is awaiting confirmation.
    pub async fn confirm_payment(
        &self,
        confirmer: &dyn PaymentConfirmer,
    ) -> Option<PaymentOutcome> {
        let (client_secret, intent_id) = match &self.state.lock().await.phase {
            Phase::AwaitingConfirmation { pending } => (
                pending.client_secret.clone(),
                pending.payment_intent_id.clone(),
            ),
            _ => return None,
        };
        debug!(intent = ?intent_id, "presenting payment confirmation");
        let outcome = confirmer.confirm(&client_secret).await;
        self.handle_outcome(outcome.clone()).await;
        Some(outcome)
    }

    /// Folds a payment outcome into coordinator and profile state. The
    /// pending intent is consumed exactly once: a stray second delivery
    /// (e.g. a recomposed UI re-reporting) finds no pending intent and is
    /// a no-op.
    pub async fn handle_outcome(&self, outcome: PaymentOutcome) {
        {
            let mut state = self.state.lock().await;
            if !matches!(state.phase, Phase::AwaitingConfirmation { .. }) {
                debug!("payment outcome with no pending intent, ignoring");
                return;
            }
            state.phase = Phase::Selecting;
            if outcome == PaymentOutcome::Completed {
                state.selection = BookingSelection::default();
            }
            // Canceled/Failed keep the selection so the user can retry
            // without re-selecting.
        }

        match outcome {
            PaymentOutcome::Completed => {
                info!("payment completed");
                *self.resolution.lock().await = Some(PaymentResolution::Completed);
                self.profile.mark_latest_paid().await;
                self.profile.refresh().await;
            }
            PaymentOutcome::Canceled => {
                debug!("payment canceled by user");
            }
            PaymentOutcome::Failed(reason) => {
                warn!("payment failed: {reason}");
                *self.resolution.lock().await = Some(PaymentResolution::Failed(reason));
            }
        }
    }

    /// Terminal status of the latest attempt, until the UI clears it.
    pub async fn resolution(&self) -> Option<PaymentResolution> {
        self.resolution.lock().await.clone()
    }

    pub async fn clear_resolution(&self) {
        *self.resolution.lock().await = None;
    }
}
