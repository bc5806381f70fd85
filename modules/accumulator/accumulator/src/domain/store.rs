//! The shared accumulator value and the lock that serializes access to it.

use parking_lot::Mutex;

use super::arith::{Overflow, checked_accumulate};

/// Single process-wide signed 64-bit accumulator.
///
/// Every access, read or write, goes through one `Mutex`. The guard is scoped to each
/// method body, so it is released on every return path including `Err`.
#[derive(Debug, Default)]
pub struct AccumulatorStore {
    value: Mutex<i64>,
}

impl AccumulatorStore {
    /// Creates a store holding `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value.
    #[must_use]
    pub fn snapshot(&self) -> i64 {
        *self.value.lock()
    }

    /// Adds `delta` if the result stays in range and returns the new value.
    ///
    /// The range check runs under the lock before the value is written, so a rejected
    /// delta has no observable effect.
    ///
    /// # Errors
    ///
    /// Returns [`Overflow`] and leaves the value unchanged when the sum does not fit.
    pub fn try_add(&self, delta: i64) -> Result<i64, Overflow> {
        let mut value = self.value.lock();
        let next = checked_accumulate(*value, delta)?;
        *value = next;
        Ok(next)
    }
}
