use thiserror::Error;

/// A calendar click that broke one of the selection rules. Every violation
/// resets the selection to `Empty`; the variant tells the caller which rule
/// fired so the UI can explain the reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionViolation {
    #[error("date is before today")]
    PastDate,
    #[error("date is already reserved")]
    DateBlocked,
    #[error("stay must be at least {min} nights")]
    StayTooShort { min: u32 },
    #[error("stay must be at most {max} nights")]
    StayTooLong { max: u32 },
    #[error("check-out must be after check-in")]
    Inverted,
    #[error("both check-in and check-out dates are required")]
    Incomplete,
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// Selection-rule failure. Recovered locally; never caused by the network.
    #[error("invalid date selection: {0}")]
    InvalidRange(#[from] SelectionViolation),

    /// The outbound call could not complete (timeout, connection failure).
    #[error("network failure: {0}")]
    Network(String),

    /// The backend reports the range was booked by someone else between the
    /// availability check and the submission.
    #[error("no longer available: {message}")]
    Conflict { message: String },

    /// The request cannot be accepted as shaped, whether caught locally
    /// (blank guest fields) or rejected by the backend.
    #[error("request rejected: {message}")]
    Validation { message: String },

    /// A newer availability query for the same room was issued before this
    /// one resolved. The result carries no usable state and must not be
    /// shown to the user.
    #[error("availability result superseded by a newer query")]
    Superseded,
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation {
            message: message.into(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, EngineError::Conflict { .. })
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        EngineError::Network(err.to_string())
    }
}
