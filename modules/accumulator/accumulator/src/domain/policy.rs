//! Open-time access policies.

use std::fmt;
use std::sync::Arc;

use accumulator_sdk::CallerId;

/// Type alias for a reference-counted access policy
pub type AccessPolicyRef = Arc<dyn AccessPolicy>;

/// Decides at open time whether a caller may use the accumulator.
pub trait AccessPolicy: fmt::Debug + Send + Sync {
    fn allows(&self, caller: CallerId) -> bool;
}

/// Lets every caller in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn allows(&self, _caller: CallerId) -> bool {
        true
    }
}

/// Only the designated owner identity may open sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerOnly {
    owner: CallerId,
}

impl OwnerOnly {
    #[must_use]
    pub fn new(owner: CallerId) -> Self {
        Self { owner }
    }

    /// Restricts access to [`CallerId::ROOT`].
    #[must_use]
    pub fn root() -> Self {
        Self::new(CallerId::ROOT)
    }
}

impl AccessPolicy for OwnerOnly {
    fn allows(&self, caller: CallerId) -> bool {
        caller == self.owner
    }
}
