//! Per-open session state.
//!
//! A session exists only after the access policy admitted its caller, so there is no
//! "unauthorized" value of this type: a rejected open simply never produces one. Closing
//! consumes the session.

use accumulator_sdk::CallerId;
use tracing::trace;

use super::codec::{decode_delta, encode_value};
use super::error::DomainError;
use super::policy::AccessPolicy;
use super::store::AccumulatorStore;

/// Whether this session has already handed out its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadState {
    /// The next read delivers the current value.
    #[default]
    Pending,
    /// The next read returns end-of-stream.
    Delivered,
}

/// One open session against the accumulator.
#[derive(Debug)]
pub struct Session {
    caller: CallerId,
    read_state: ReadState,
}

impl Session {
    /// Admits `caller` through `policy` and opens a session with a pending read.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PermissionDenied`] if the policy rejects the caller.
    pub fn open(policy: &dyn AccessPolicy, caller: CallerId) -> Result<Self, DomainError> {
        if !policy.allows(caller) {
            return Err(DomainError::PermissionDenied(caller));
        }
        Ok(Self {
            caller,
            read_state: ReadState::Pending,
        })
    }

    #[must_use]
    pub fn caller(&self) -> CallerId {
        self.caller
    }

    #[must_use]
    pub fn read_state(&self) -> ReadState {
        self.read_state
    }

    /// Delivers `"<value>\n"` once; afterwards returns empty.
    ///
    /// Delivery is all-or-nothing: when the line does not fit in `max_len` the read
    /// returns empty and the delivery stays pending. An already-delivered session does
    /// not touch the store.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AllocationFailure`] if the output buffer cannot be
    /// reserved. The session stays pending in that case.
    pub fn read(
        &mut self,
        store: &AccumulatorStore,
        max_len: usize,
    ) -> Result<Vec<u8>, DomainError> {
        if self.read_state == ReadState::Delivered || max_len == 0 {
            return Ok(Vec::new());
        }

        let line = encode_value(store.snapshot())?;
        if line.len() > max_len {
            return Ok(Vec::new());
        }
        self.read_state = ReadState::Delivered;
        Ok(line)
    }

    /// Repositions the read stream. Only position `0` re-arms delivery.
    pub fn seek(&mut self, position: u64) {
        self.read_state = if position == 0 {
            ReadState::Pending
        } else {
            ReadState::Delivered
        };
    }

    /// Decodes `payload` and adds it to the store. Does not affect the read state.
    ///
    /// Returns the new accumulator value; the caller reports `payload.len()` bytes
    /// consumed.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidInput`] if the payload is not a signed integer
    /// - [`DomainError::Overflow`] if the sum leaves the `i64` range
    /// - [`DomainError::AllocationFailure`] if the decode buffer cannot be reserved
    pub fn write(&self, store: &AccumulatorStore, payload: &[u8]) -> Result<i64, DomainError> {
        let delta = decode_delta(payload)?;
        trace!(caller = %self.caller, delta, "applying delta");
        let value = store.try_add(delta)?;
        Ok(value)
    }
}
