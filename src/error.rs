use thiserror::Error;
use tranzr_common::JobId;

use crate::service::ServiceError;

#[derive(Error, Debug)]
pub enum TranzrError {
    #[error("Config error: {0}")]
    Config(String),

    /// Local validation failure; the text is shown to the user as is
    #[error("{0}")]
    Validation(String),

    #[error("Sign-in failed for {0}")]
    AuthenticationFailed(String),

    #[error("A booking submission is already in progress")]
    SubmissionInFlight,

    #[error("Booking already submitted as {0}")]
    AlreadySubmitted(JobId),

    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error("Booking service error: {0}")]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Booking(#[from] tranzr_common::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl TranzrError {
    /// Errors the user can fix in place without losing the draft
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TranzrError::Validation(_)
                | TranzrError::AuthenticationFailed(_)
                | TranzrError::SubmissionInFlight
                | TranzrError::Service(_)
                | TranzrError::Booking(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TranzrError>;
