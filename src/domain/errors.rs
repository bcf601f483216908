use thiserror::Error;

/// Raised by the PO calculator when the order cannot be priced at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Size is required")]
    MissingSize,
    #[error("Size must be text")]
    SizeNotText,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Purchase order not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for DomainError {
    fn from(e: ValidationError) -> Self {
        DomainError::Validation(e.to_string())
    }
}
