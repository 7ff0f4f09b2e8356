use serde::{Deserialize, Serialize};

/// One assistant turn: a displayable message plus an optional booking
/// snapshot when the conversation is driving a payment flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub message: String,
    pub state: Option<BookingState>,
}

impl ChatResponse {
    /// A reply produced locally (auth gate, transport failure, shape
    /// fallback) rather than parsed from the backend.
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            state: None,
        }
    }
}

/// Partial booking snapshot the conversational backend may attach to a
/// reply. Wire fields are snake_case; everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingState {
    pub status: Option<String>,
    pub booking_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub service_id: Option<String>,
    pub therapist_id: Option<String>,
    pub date: Option<String>,
    pub time_slot: Option<String>,
    pub client_secret: Option<String>,
}

impl BookingState {
    pub const READY_FOR_PAYMENT: &'static str = "READY_FOR_PAYMENT";

    /// True when this snapshot can drive the payment-confirmation step:
    /// the backend declared it ready and supplied a client secret.
    pub fn is_ready_for_payment(&self) -> bool {
        self.status.as_deref() == Some(Self::READY_FOR_PAYMENT) && self.client_secret.is_some()
    }

    /// Drops empty-string fields down to `None`; the assistant backend
    /// sends `""` for fields it has no value for.
    pub fn normalized(mut self) -> Self {
        fn scrub(field: &mut Option<String>) {
            if field.as_deref().is_some_and(|v| v.is_empty()) {
                *field = None;
            }
        }
        scrub(&mut self.status);
        scrub(&mut self.booking_id);
        scrub(&mut self.payment_intent_id);
        scrub(&mut self.service_id);
        scrub(&mut self.therapist_id);
        scrub(&mut self.date);
        scrub(&mut self.time_slot);
        scrub(&mut self.client_secret);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_for_payment_needs_status_and_secret() {
        let mut state = BookingState {
            status: Some("READY_FOR_PAYMENT".into()),
            client_secret: Some("cs_1".into()),
            ..Default::default()
        };
        assert!(state.is_ready_for_payment());

        state.client_secret = None;
        assert!(!state.is_ready_for_payment());

        state.client_secret = Some("cs_1".into());
        state.status = Some("COLLECTING".into());
        assert!(!state.is_ready_for_payment());
    }

    #[test]
    fn normalized_drops_empty_strings() {
        let state = BookingState {
            status: Some(String::new()),
            booking_id: Some("b1".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(state.status, None);
        assert_eq!(state.booking_id.as_deref(), Some("b1"));
    }
}
