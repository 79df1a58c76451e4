//! Application layer - Use cases and orchestration
//!
//! Contains the six-hour forecast entity and the port it fetches through.
//! Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
