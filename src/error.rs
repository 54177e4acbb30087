//! Error types shared by the record, predicate, operator and binder layers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Field index {index} out of range for record with {len} fields")]
    OutOfRange { index: usize, len: usize },

    #[error("Field not found in header: {0}")]
    FieldNotFound(String),

    #[error("Value '{value}' of field '{field}' is not a decimal number")]
    Format { field: String, value: String },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Operator is not open. Call open() first.")]
    NotOpen,

    #[error("Duplicate table alias: {0}")]
    DuplicateAlias(String),

    #[error("Input error: {0}")]
    Input(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OutOfRange { index: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "Field index 5 out of range for record with 3 fields"
        );

        let err = Error::FieldNotFound("age".to_string());
        assert_eq!(err.to_string(), "Field not found in header: age");

        let err = Error::Format {
            field: "age".to_string(),
            value: "old".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Value 'old' of field 'age' is not a decimal number"
        );

        let err = Error::DuplicateAlias("p".to_string());
        assert_eq!(err.to_string(), "Duplicate table alias: p");
    }
}
