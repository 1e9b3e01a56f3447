//! Hardware drivers — one-shot peripheral init and dumb actuators.
//!
//! Drivers hold no policy. Whether a relay should be on is decided by the
//! control core; drivers just move pins.

pub mod hw_init;
pub mod relay;
