//! `AccumulatorEndpointV1` trait definition.
//!
//! This trait is the whole surface the accumulator exposes to its host. A host
//! adapter (a device node, a command loop, a test) maps its own open/read/write/close
//! callbacks onto these methods and never touches the stored value directly.

use crate::errors::AccumulatorError;
use crate::models::{CallerId, SessionHandle};

/// Session-oriented byte-stream endpoint over the shared accumulator (Version 1).
///
/// All methods are synchronous: a call that needs the accumulator blocks the calling
/// thread until the value is free, then returns. Implementations must be safe to call
/// concurrently from many threads.
pub trait AccumulatorEndpointV1: Send + Sync {
    /// Open a new session on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::PermissionDenied`] when the configured access policy
    /// rejects `caller`. No session exists afterwards.
    fn open(&self, caller: CallerId) -> Result<SessionHandle, AccumulatorError>;

    /// Read the current value as `"<decimal>\n"`.
    ///
    /// Each session delivers the whole line once; later reads return an empty vector until
    /// the session is repositioned to `0` with [`seek`](Self::seek). A `max_len` too small
    /// for the line returns an empty vector and leaves the delivery pending.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::UnknownSession`] for a closed or foreign handle and
    /// [`AccumulatorError::AllocationFailure`] when the output buffer cannot be obtained.
    fn read(&self, session: SessionHandle, max_len: usize) -> Result<Vec<u8>, AccumulatorError>;

    /// Reposition the session's read stream.
    ///
    /// Position `0` re-arms the single delivery; any other position counts as already
    /// delivered.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::UnknownSession`] for a closed or foreign handle.
    fn seek(&self, session: SessionHandle, position: u64) -> Result<(), AccumulatorError>;

    /// Add the signed decimal integer in `payload` to the accumulator.
    ///
    /// Returns the number of bytes consumed, which is always `payload.len()`.
    ///
    /// # Errors
    ///
    /// - [`AccumulatorError::InvalidInput`] when `payload` is not a signed decimal integer
    /// - [`AccumulatorError::Overflow`] when the addition would leave the `i64` range
    /// - [`AccumulatorError::AllocationFailure`] when the decode buffer cannot be obtained
    /// - [`AccumulatorError::UnknownSession`] for a closed or foreign handle
    ///
    /// The accumulator is unchanged whenever an error is returned.
    fn write(&self, session: SessionHandle, payload: &[u8]) -> Result<usize, AccumulatorError>;

    /// Close the session and release it.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::UnknownSession`] if the handle is not open.
    fn close(&self, session: SessionHandle) -> Result<(), AccumulatorError>;
}
