//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Location name is empty or otherwise unusable
    #[error("Invalid location name: {0}")]
    InvalidLocationName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_location_name_error_message() {
        let err = DomainError::InvalidLocationName("   ".to_string());
        assert_eq!(err.to_string(), "Invalid location name:    ");
    }
}
