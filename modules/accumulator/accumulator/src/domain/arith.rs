//! Overflow-checked addition against the signed 64-bit range.

/// Returned when `current + delta` does not fit in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow {
    pub current: i64,
    pub delta: i64,
}

/// Computes `current + delta`, rejecting any result outside `i64::MIN..=i64::MAX`.
///
/// The check is `delta > 0 && current > i64::MAX - delta` or
/// `delta < 0 && current < i64::MIN - delta`; no wrapping path exists.
///
/// # Errors
///
/// Returns [`Overflow`] carrying both operands when the sum is out of range.
#[inline]
pub fn checked_accumulate(current: i64, delta: i64) -> Result<i64, Overflow> {
    current
        .checked_add(delta)
        .ok_or(Overflow { current, delta })
}
