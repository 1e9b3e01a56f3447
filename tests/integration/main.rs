//! Host-side integration tests.
//!
//! These run on the host (x86_64) and verify the full cycle from sensor
//! snapshot and remote directives down to actuator calls and telemetry
//! writes, without any real hardware or network.

#![cfg(not(target_os = "espidf"))]

mod mock_hw;

mod control_cycle_tests;
mod telemetry_tests;
