#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for accumulator integration tests

use std::sync::Arc;

use accumulator::domain::policy::{AllowAll, OwnerOnly};
use accumulator::{AccumulatorConfig, Service};
use accumulator_sdk::{AccumulatorEndpointV1, CallerId, SessionHandle};

pub const USER: CallerId = CallerId::new(1000);

pub fn open_service() -> Arc<Service> {
    Arc::new(Service::new(Arc::new(AllowAll)))
}

pub fn root_only_service() -> Arc<Service> {
    Arc::new(Service::new(Arc::new(OwnerOnly::root())))
}

pub fn configured_service(config: &AccumulatorConfig) -> Arc<Service> {
    Arc::new(Service::init(config))
}

/// Opens a session, writes one payload, and closes it, like `echo N > node`.
pub fn write_once(svc: &Service, payload: &[u8]) -> Result<usize, accumulator_sdk::AccumulatorError> {
    let s = svc.open(USER).unwrap();
    let res = svc.write(s, payload);
    svc.close(s).unwrap();
    res
}

/// Opens a fresh session and reads its line, like `cat node`.
pub fn read_fresh(svc: &Service) -> String {
    let s = svc.open(USER).unwrap();
    let line = read_line(svc, s);
    svc.close(s).unwrap();
    line
}

pub fn read_line(svc: &Service, s: SessionHandle) -> String {
    String::from_utf8(svc.read(s, 4096).unwrap()).unwrap()
}
