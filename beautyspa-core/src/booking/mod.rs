// =============================================================================
// beautyspa-core/src/booking/mod.rs
// =============================================================================

pub mod coordinator;
pub mod selection;

pub use coordinator::{BookingCoordinator, Catalog};
pub use selection::{BookingSelection, default_time_slots};
