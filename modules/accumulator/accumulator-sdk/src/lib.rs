//! Accumulator SDK
//!
//! This crate provides the public contract of the accumulator module:
//! - `AccumulatorEndpointV1` trait, the open/read/seek/write/close surface a host
//!   endpoint dispatches to
//! - Identity and handle types (`CallerId`, `SessionHandle`)
//! - Error type (`AccumulatorError`)
//!
//! ## Usage
//!
//! ```ignore
//! use accumulator_sdk::{AccumulatorEndpointV1, CallerId};
//!
//! let session = endpoint.open(CallerId::ROOT)?;
//! endpoint.write(session, b"42\n")?;
//! let line = endpoint.read(session, 64)?; // b"42\n"
//! endpoint.close(session)?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::AccumulatorEndpointV1;
pub use errors::AccumulatorError;
pub use models::{CallerId, SessionHandle};
