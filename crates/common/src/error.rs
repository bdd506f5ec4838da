use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockConfigError {
    #[error("Invalid mock type: {0:?}")]
    InvalidMockType(String),
}

/// Errors raised by the external test-framework collaborator. This layer
/// passes them through without translation or recovery.
#[derive(Debug, Error)]
pub enum FrameworkError {
    #[error("Cannot mock unknown type: {0}")]
    UnknownClass(String),
    #[error("Cannot stub unknown method: {0}")]
    UnknownMethod(String),
    #[error("{0}")]
    Custom(String),
}
