//! Domain layer for the Met.no six-hour forecast
//!
//! Contains the forecast entities, value objects, and domain errors.
//! This layer knows nothing about the Met.no wire format or the host entity model.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
