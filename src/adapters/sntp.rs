//! SNTP wall-clock adapter.
//!
//! Implements [`ClockPort`]. The SNTP service resyncs the system clock in
//! the background; [`SntpClock::refresh`] samples it once per cycle and
//! folds in the configured UTC offset.
//!
//! Stale-but-available: if the clock has not synced (or the sample looks
//! pre-epoch), the previously known wall-clock values are kept and the
//! cycle proceeds — hour 0 (midnight) before the first ever sync.
//!
//! ## Dual-target design
//!
//! - **`target_os = "espidf"`** — `EspSntp` service plus `gettimeofday`.
//! - **`not(target_os = "espidf")`** — wall clock injected via atomics,
//!   uptime from `std::time::Instant`.

use core::fmt::Write as _;

use crate::app::ports::ClockPort;
#[cfg(target_os = "espidf")]
use crate::config::UTC_OFFSET_SECS;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use log::warn;

/// Samples before 2020-01-01 UTC mean the clock never synced.
#[cfg(target_os = "espidf")]
const EPOCH_2020: i64 = 1_577_836_800;

#[cfg(not(target_os = "espidf"))]
static SIM_WALL_SECS: AtomicU32 = AtomicU32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_SYNCED: AtomicBool = AtomicBool::new(false);

/// Inject the simulated wall clock as seconds since local midnight.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_wall_secs(secs_of_day: u32) {
    SIM_WALL_SECS.store(secs_of_day % 86_400, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_synced(synced: bool) {
    SIM_SYNCED.store(synced, Ordering::Relaxed);
}

/// Clock adapter: SNTP-backed wall time plus monotonic uptime.
pub struct SntpClock {
    #[cfg(target_os = "espidf")]
    _sntp: Option<esp_idf_svc::sntp::EspSntp<'static>>,
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
    hour: u8,
    minute: u8,
    second: u8,
    synced: bool,
}

impl Default for SntpClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SntpClock {
    /// Start the SNTP service (background resync). A failed service start
    /// leaves the clock permanently stale rather than failing boot.
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "espidf")]
            _sntp: match esp_idf_svc::sntp::EspSntp::new_default() {
                Ok(sntp) => Some(sntp),
                Err(e) => {
                    warn!("SNTP start failed ({e}); wall clock stays stale");
                    None
                }
            },
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
            hour: 0,
            minute: 0,
            second: 0,
            synced: false,
        }
    }

    /// Whether at least one successful sync has been observed.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    fn apply_secs_of_day(&mut self, secs_of_day: u32) {
        self.hour = (secs_of_day / 3_600) as u8;
        self.minute = ((secs_of_day / 60) % 60) as u8;
        self.second = (secs_of_day % 60) as u8;
        self.synced = true;
    }

    #[cfg(target_os = "espidf")]
    fn sample_wall_clock(&mut self) {
        use core::ptr;
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: gettimeofday only writes the provided struct.
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, ptr::null_mut()) } != 0 {
            return;
        }
        let epoch = tv.tv_sec as i64;
        if epoch < EPOCH_2020 {
            return;
        }
        let local = epoch + UTC_OFFSET_SECS;
        self.apply_secs_of_day((local.rem_euclid(86_400)) as u32);
    }

    #[cfg(not(target_os = "espidf"))]
    fn sample_wall_clock(&mut self) {
        if !SIM_SYNCED.load(Ordering::Relaxed) {
            return;
        }
        self.apply_secs_of_day(SIM_WALL_SECS.load(Ordering::Relaxed));
    }
}

impl ClockPort for SntpClock {
    fn refresh(&mut self) {
        self.sample_wall_clock();
    }

    #[cfg(target_os = "espidf")]
    fn uptime_ms(&self) -> u64 {
        // SAFETY: esp_timer_get_time is a monotonic counter read.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn current_hour(&self) -> u8 {
        self.hour
    }

    fn timestamp(&self) -> heapless::String<20> {
        let mut s = heapless::String::new();
        let _ = write!(s, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second);
        s
    }
}
