//! Domain service for the accumulator.
//!
//! Owns the store, the access policy and the table of open sessions, and implements the
//! SDK endpoint trait on top of them. Hosts hold the service (usually in an `Arc`) and
//! forward their open/read/write/close callbacks to it.

use std::sync::atomic::{AtomicU64, Ordering};

use accumulator_sdk::{AccumulatorEndpointV1, AccumulatorError, CallerId, SessionHandle};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use super::error::DomainError;
use super::policy::AccessPolicyRef;
use super::session::Session;
use super::store::AccumulatorStore;
use crate::config::AccumulatorConfig;

pub struct Service {
    store: AccumulatorStore,
    policy: AccessPolicyRef,
    sessions: DashMap<SessionHandle, Session>,
    next_handle: AtomicU64,
}

impl Service {
    /// Creates a service whose accumulator starts at `0`.
    #[must_use]
    pub fn new(policy: AccessPolicyRef) -> Self {
        Self {
            store: AccumulatorStore::new(),
            policy,
            sessions: DashMap::new(),
            next_handle: AtomicU64::new(1),
        }
    }

    /// Builds the service from module configuration.
    #[must_use]
    pub fn init(config: &AccumulatorConfig) -> Self {
        let service = Self::new(config.access.build());
        info!(policy = ?service.policy, "accumulator initialized");
        service
    }

    /// Tears the service down, dropping any sessions still open, and returns the final
    /// value.
    #[must_use]
    pub fn shutdown(self) -> i64 {
        let value = self.store.snapshot();
        info!(
            value,
            open_sessions = self.sessions.len(),
            "accumulator shut down"
        );
        value
    }

    /// Current accumulator value, for embedders and diagnostics.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.store.snapshot()
    }

    #[must_use]
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    fn mint_handle(&self) -> SessionHandle {
        SessionHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed))
    }
}

impl AccumulatorEndpointV1 for Service {
    fn open(&self, caller: CallerId) -> Result<SessionHandle, AccumulatorError> {
        let session = Session::open(self.policy.as_ref(), caller).inspect_err(|_| {
            warn!(%caller, "open denied by access policy");
        })?;
        let handle = self.mint_handle();
        self.sessions.insert(handle, session);
        debug!(%caller, session = %handle, "session opened");
        Ok(handle)
    }

    fn read(&self, session: SessionHandle, max_len: usize) -> Result<Vec<u8>, AccumulatorError> {
        let mut entry = self
            .sessions
            .get_mut(&session)
            .ok_or(DomainError::UnknownSession(session))?;
        let line = entry.read(&self.store, max_len)?;
        if line.is_empty() {
            debug!(session = %session, max_len, "read returned no data");
        } else {
            debug!(
                session = %session,
                bytes = line.len(),
                line = %String::from_utf8_lossy(&line).trim_end(),
                "value delivered"
            );
        }
        Ok(line)
    }

    fn seek(&self, session: SessionHandle, position: u64) -> Result<(), AccumulatorError> {
        let mut entry = self
            .sessions
            .get_mut(&session)
            .ok_or(DomainError::UnknownSession(session))?;
        entry.seek(position);
        debug!(session = %session, position, "session repositioned");
        Ok(())
    }

    fn write(&self, session: SessionHandle, payload: &[u8]) -> Result<usize, AccumulatorError> {
        let entry = self
            .sessions
            .get(&session)
            .ok_or(DomainError::UnknownSession(session))?;
        match entry.write(&self.store, payload) {
            Ok(value) => {
                debug!(session = %session, bytes = payload.len(), value, "write applied");
                Ok(payload.len())
            }
            Err(e) => {
                warn!(session = %session, error = %e, "write rejected");
                Err(e.into())
            }
        }
    }

    fn close(&self, session: SessionHandle) -> Result<(), AccumulatorError> {
        let (_, closed) = self
            .sessions
            .remove(&session)
            .ok_or(DomainError::UnknownSession(session))?;
        debug!(session = %session, caller = %closed.caller(), "session closed");
        Ok(())
    }
}
