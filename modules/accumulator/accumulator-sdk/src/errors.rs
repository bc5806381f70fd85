//! Error types for the accumulator SDK.

use thiserror::Error;

use crate::models::{CallerId, SessionHandle};

/// Errors returned by [`AccumulatorEndpointV1`](crate::AccumulatorEndpointV1).
///
/// None of these are fatal to the service and none leave the accumulator partially
/// updated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccumulatorError {
    /// The access policy rejected the caller at open time.
    #[error("permission denied for caller {caller}")]
    PermissionDenied { caller: CallerId },

    /// The write payload is not a signed decimal integer.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Adding the delta would leave the signed 64-bit range.
    #[error("adding {delta} to {current} would overflow")]
    Overflow { current: i64, delta: i64 },

    /// A request buffer could not be obtained. Safe to retry.
    #[error("failed to allocate a {requested}-byte buffer")]
    AllocationFailure { requested: usize },

    /// The handle does not name an open session.
    #[error("unknown session {session}")]
    UnknownSession { session: SessionHandle },
}

impl AccumulatorError {
    #[must_use]
    pub fn permission_denied(caller: CallerId) -> Self {
        Self::PermissionDenied { caller }
    }

    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn overflow(current: i64, delta: i64) -> Self {
        Self::Overflow { current, delta }
    }

    #[must_use]
    pub fn allocation_failure(requested: usize) -> Self {
        Self::AllocationFailure { requested }
    }

    #[must_use]
    pub fn unknown_session(session: SessionHandle) -> Self {
        Self::UnknownSession { session }
    }

    /// POSIX-style symbolic code a device host reports for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "EPERM",
            Self::InvalidInput { .. } => "EINVAL",
            Self::Overflow { .. } => "EOVERFLOW",
            Self::AllocationFailure { .. } => "ENOMEM",
            Self::UnknownSession { .. } => "EBADF",
        }
    }

    /// Whether resubmitting the same request can succeed later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AllocationFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            AccumulatorError::permission_denied(CallerId::new(1000)).code(),
            "EPERM"
        );
        assert_eq!(AccumulatorError::invalid_input("abc").code(), "EINVAL");
        assert_eq!(AccumulatorError::overflow(i64::MAX, 1).code(), "EOVERFLOW");
        assert_eq!(AccumulatorError::allocation_failure(8).code(), "ENOMEM");
        assert_eq!(
            AccumulatorError::unknown_session(SessionHandle::new(3)).code(),
            "EBADF"
        );
    }

    #[test]
    fn test_only_allocation_failure_is_retryable() {
        assert!(AccumulatorError::allocation_failure(8).is_retryable());
        assert!(!AccumulatorError::overflow(i64::MAX, 1).is_retryable());
        assert!(!AccumulatorError::invalid_input("").is_retryable());
    }

    #[test]
    fn test_display() {
        let err = AccumulatorError::overflow(i64::MAX, 1);
        assert_eq!(
            err.to_string(),
            "adding 1 to 9223372036854775807 would overflow"
        );
        let err = AccumulatorError::permission_denied(CallerId::new(1000));
        assert_eq!(err.to_string(), "permission denied for caller 1000");
    }
}
