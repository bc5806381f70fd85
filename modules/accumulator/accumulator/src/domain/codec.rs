//! Text codec for the byte-stream surface.
//!
//! - write payloads carry one base-10 signed integer, optionally newline terminated
//! - read payloads are the value in base 10 followed by exactly one `\n`

use std::ffi::c_long;
use std::io::Write;
use std::num::IntErrorKind;

use super::error::DomainError;

/// Longest encoded line: `"-9223372036854775808\n"`.
pub const MAX_LINE_LEN: usize = 21;

/// Decodes one write payload into the delta it carries.
///
/// The payload is copied into an owned buffer and bounded at the first NUL byte. One
/// trailing `\n` is accepted. The rest must be an optional `+`/`-` followed by decimal
/// digits that fit the platform `long`.
///
/// # Errors
///
/// - [`DomainError::InvalidInput`] for empty, non-numeric or out-of-range payloads
/// - [`DomainError::AllocationFailure`] if the copy buffer cannot be reserved
pub fn decode_delta(payload: &[u8]) -> Result<i64, DomainError> {
    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(payload.len())
        .map_err(|_| DomainError::AllocationFailure(payload.len()))?;
    buf.extend_from_slice(payload);

    if let Some(nul) = buf.iter().position(|&b| b == 0) {
        buf.truncate(nul);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.is_empty() {
        return Err(DomainError::invalid_input("empty payload"));
    }

    let text = std::str::from_utf8(&buf)
        .map_err(|_| DomainError::invalid_input("payload is not ASCII text"))?;
    let parsed: c_long = text.parse().map_err(|e: std::num::ParseIntError| {
        let reason = match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                format!("{text:?} is out of range")
            }
            _ => format!("{text:?} is not a signed decimal integer"),
        };
        DomainError::InvalidInput(reason)
    })?;

    // `long` is 32-bit on some targets.
    #[allow(clippy::useless_conversion)]
    let delta = i64::from(parsed);
    Ok(delta)
}

/// Encodes a value as its read payload, `"<decimal>\n"`.
///
/// # Errors
///
/// Returns [`DomainError::AllocationFailure`] if the output buffer cannot be reserved.
pub fn encode_value(value: i64) -> Result<Vec<u8>, DomainError> {
    let mut line: Vec<u8> = Vec::new();
    line.try_reserve_exact(MAX_LINE_LEN)
        .map_err(|_| DomainError::AllocationFailure(MAX_LINE_LEN))?;
    writeln!(line, "{value}").map_err(|_| DomainError::AllocationFailure(MAX_LINE_LEN))?;
    Ok(line)
}
