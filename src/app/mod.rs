//! Application core — pure loop logic, zero I/O.
//!
//! This module contains the per-tick telemetry procedure: link supervision,
//! periodic sampling, debounced edge dispatch.  All interaction with
//! hardware and the network happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod ports;
pub mod service;
