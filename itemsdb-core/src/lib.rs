//! Core data models and types for itemsdb

pub mod batch;
pub mod error;
pub mod scheme;
pub mod types;

pub use batch::*;
pub use error::*;
pub use scheme::*;
pub use types::*;

/// Result type alias for precondition checks
pub type Result<T> = std::result::Result<T, ItemsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ItemsError::NoName.to_string(), "no name given");
        assert_eq!(ItemsError::EmptyScheme.to_string(), "scheme empty");
        assert_eq!(ItemsError::EmptyId.to_string(), "id empty");
        assert_eq!(ItemsError::EmptyItem.to_string(), "item empty");
        assert_eq!(
            ItemsError::NotNumeric { field: "size" }.to_string(),
            "size should be numeric"
        );
        assert_eq!(
            ItemsError::OutOfRange { field: "from" }.to_string(),
            "from should be a non-negative integer"
        );
        assert_eq!(
            ItemsError::UnknownType("colour".to_string()).to_string(),
            "unknown or invalid type: colour"
        );
    }
}
