use chrono::{DateTime, Utc};

use beautyspa_common::models::{Service, Specialist};

/// The in-progress, not-yet-submitted set of user choices for one booking
/// session. Complete only when all four fields are set.
#[derive(Debug, Clone, Default)]
pub struct BookingSelection {
    pub service: Option<Service>,
    pub date: Option<DateTime<Utc>>,
    pub time_slot: Option<String>,
    pub specialist: Option<Specialist>,
}

impl BookingSelection {
    pub fn is_complete(&self) -> bool {
        self.service.is_some()
            && self.date.is_some()
            && self.time_slot.is_some()
            && self.specialist.is_some()
    }

    /// The first unset field, in the order the flow asks for them. `None`
    /// when the selection is complete.
    pub fn first_missing(&self) -> Option<&'static str> {
        if self.service.is_none() {
            return Some("service");
        }
        if self.date.is_none() {
            return Some("date");
        }
        if self.time_slot.is_none() {
            return Some("time slot");
        }
        if self.specialist.is_none() {
            return Some("specialist");
        }
        None
    }
}

/// The bookable slot grid shown by the booking screen: half-hour steps from
/// 9:00 AM through 6:00 PM.
pub fn default_time_slots() -> Vec<String> {
    [
        "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "12:00 PM",
        "12:30 PM", "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM", "3:00 PM", "3:30 PM", "4:00 PM",
        "4:30 PM", "5:00 PM", "5:30 PM", "6:00 PM",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
