//! Application core — orchestration of the pure control logic.
//!
//! The business rules for the GrowPod system live here: the per-cycle
//! reconciliation drive and the telemetry cadence. All interaction with
//! hardware and the network happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
