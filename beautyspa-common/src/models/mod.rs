pub mod appointment;
pub mod assistant;
pub mod auth;
pub mod payment;
pub mod service;
pub mod specialist;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus};
pub use assistant::{BookingState, ChatResponse};
pub use auth::AuthResponse;
pub use payment::{PaymentIntent, PaymentIntentRequest, PaymentOutcome, PaymentResolution};
pub use service::{Service, ServiceCategory};
pub use specialist::Specialist;
pub use user::{User, UserPreferences};
