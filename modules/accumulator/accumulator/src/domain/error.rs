//! Domain error types for the accumulator module.

use accumulator_sdk::{AccumulatorError, CallerId, SessionHandle};
use thiserror::Error;

use super::arith::Overflow;

/// Domain-level errors for the accumulator module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The access policy rejected the caller.
    #[error("caller {0} is not permitted to open the accumulator")]
    PermissionDenied(CallerId),

    /// The payload did not decode to a signed integer.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The addition would leave the `i64` range.
    #[error("adding {delta} to {current} would overflow")]
    Overflow { current: i64, delta: i64 },

    /// A buffer of the given size could not be reserved.
    #[error("allocation of {0} bytes failed")]
    AllocationFailure(usize),

    /// No open session has this handle.
    #[error("session {0} is not open")]
    UnknownSession(SessionHandle),
}

impl DomainError {
    /// Creates an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

impl From<Overflow> for DomainError {
    fn from(o: Overflow) -> Self {
        Self::Overflow {
            current: o.current,
            delta: o.delta,
        }
    }
}

impl From<DomainError> for AccumulatorError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::PermissionDenied(caller) => AccumulatorError::permission_denied(caller),
            DomainError::InvalidInput(reason) => AccumulatorError::invalid_input(reason),
            DomainError::Overflow { current, delta } => AccumulatorError::overflow(current, delta),
            DomainError::AllocationFailure(requested) => {
                AccumulatorError::allocation_failure(requested)
            }
            DomainError::UnknownSession(session) => AccumulatorError::unknown_session(session),
        }
    }
}
