// SysBridge - platform/clock.rs
//
// Wall clock and local UTC offset from the host OS via chrono.

use crate::core::services::Clock;
use chrono::{Local, Utc};

/// The host's system clock and timezone configuration.
///
/// Not monotonic: follows wall-clock adjustments (NTP, manual changes).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_time(&self) -> f64 {
        let now = Utc::now();
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) * 1e-9
    }

    fn utc_offset(&self) -> i32 {
        Local::now().offset().local_minus_utc()
    }
}
