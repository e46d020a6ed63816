use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the booking and account workflows.
///
/// Expected user mistakes (bad form input, wrong password) are usually
/// reported as flash messages instead; these variants cover what the HTTP
/// layer turns into an error status.
#[derive(Error, Debug)]
pub enum LabError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    /// A store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl LabError {
    pub fn slot_not_found(slot_id: Uuid) -> Self {
        Self::NotFound(format!("Slot with ID {} not found", slot_id))
    }
}

pub type LabResult<T> = Result<T, LabError>;
