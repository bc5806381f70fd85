//! Accumulator Module
//!
//! A single shared signed 64-bit counter exposed through open/read/write/close
//! sessions, the way a character device exposes a value to many processes.
//!
//! ## Architecture
//!
//! - `domain/arith.rs` - Overflow-checked addition
//! - `domain/store.rs` - The shared value and its lock
//! - `domain/codec.rs` - Decimal text in and out
//! - `domain/policy.rs` - Open-time access policies
//! - `domain/session.rs` - Per-session read/write state
//! - `domain/service.rs` - Service lifecycle and the `AccumulatorEndpointV1` implementation
//! - `config.rs` - Module configuration
//!
//! Hosts should program against `accumulator-sdk`'s `AccumulatorEndpointV1` and hold the
//! `Service` behind it.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod domain;

pub use config::{AccessPolicyConfig, AccumulatorConfig};
pub use domain::Service;
