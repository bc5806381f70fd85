//! Domain layer for the accumulator module.

pub mod arith;
pub mod codec;
pub mod error;
pub mod policy;
pub mod service;
pub mod session;
pub mod store;

pub use service::Service;
