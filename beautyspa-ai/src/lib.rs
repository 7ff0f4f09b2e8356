//! Client for the conversational booking assistant. The assistant surface
//! always yields a displayable message, never an error; replies may carry a
//! booking snapshot that feeds the payment flow.

pub mod client;

pub use client::AssistantClient;
