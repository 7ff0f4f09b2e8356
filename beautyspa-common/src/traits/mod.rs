pub mod api;
pub mod identity;
pub mod payment;
pub mod storage;

pub use api::{AppointmentQuery, BookingBackend, ServiceFilter, SpecialistFilter};
pub use identity::IdentityProvider;
pub use payment::PaymentConfirmer;
pub use storage::{TokenSource, TokenStorage};
