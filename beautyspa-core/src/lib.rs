//! Core of the beauty-spa booking app: session lifecycle, the typed REST
//! client, the booking/payment coordinator, and the profile aggregator.
//!
//! Everything network-facing is async and reports back through state
//! holders; rendering, navigation and transport internals live elsewhere.

pub mod api;
pub mod auth;
pub mod booking;
pub mod config;
pub mod context;
pub mod profile;

pub use beautyspa_common::Error;
