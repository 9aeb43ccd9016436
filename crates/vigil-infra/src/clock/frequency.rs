// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Estimation of the cycle counter's tick rate.
//!
//! The estimate is computed once per process, on first use, and cached.
//! Sources are tried from most to least trustworthy; runtime calibration
//! against [`std::time::Instant`] is the general fallback.

use std::sync::OnceLock;

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use std::ops::RangeInclusive;
#[cfg(target_arch = "x86_64")]
use vigil_core::HostInfo;

/// Returns the estimated counter ticks per second, computing it on first call.
pub fn processor_frequency() -> f64 {
    static FREQUENCY: OnceLock<f64> = OnceLock::new();

    *FREQUENCY.get_or_init(|| {
        let hz = estimate();
        log::debug!(
            "{} counter frequency estimated at {:.2} MHz",
            super::counter_name(),
            hz / 1e6
        );
        hz
    })
}

#[cfg(target_arch = "x86_64")]
const REASONABLE_TSC_HZ: RangeInclusive<f64> = 500e6..=10e9;

#[cfg(target_arch = "x86_64")]
fn estimate() -> f64 {
    #[cfg(target_os = "linux")]
    if let Some(hz) = tsc_freq_from_sysfs() {
        return hz;
    }

    if let Some(hz) = calibrate(REASONABLE_TSC_HZ) {
        return hz;
    }

    log::warn!("TSC calibration failed, falling back to the reported CPU frequency");
    crate::platform::SysinfoHost::new()
        .cpu_frequency_hz()
        .filter(|hz| REASONABLE_TSC_HZ.contains(hz))
        .unwrap_or(3e9)
}

#[cfg(all(target_arch = "x86_64", target_os = "linux"))]
fn tsc_freq_from_sysfs() -> Option<f64> {
    let content = std::fs::read_to_string("/sys/devices/system/cpu/cpu0/tsc_freq_khz").ok()?;
    let khz: u64 = content.trim().parse().ok()?;
    let hz = khz as f64 * 1e3;
    REASONABLE_TSC_HZ.contains(&hz).then_some(hz)
}

#[cfg(target_arch = "aarch64")]
const REASONABLE_CNTVCT_HZ: RangeInclusive<f64> = 1e6..=10e9;

#[cfg(target_arch = "aarch64")]
fn estimate() -> f64 {
    let cntfrq: u64;
    // SAFETY: CNTFRQ_EL0 is readable from EL0.
    unsafe {
        core::arch::asm!("mrs {}, cntfrq_el0", out(reg) cntfrq, options(nomem, nostack));
    }
    let hz = cntfrq as f64;
    if REASONABLE_CNTVCT_HZ.contains(&hz) {
        return hz;
    }

    log::warn!("CNTFRQ_EL0 reported {} Hz, calibrating instead", cntfrq);
    // Apple Silicon M1/M2 rate.
    calibrate(REASONABLE_CNTVCT_HZ).unwrap_or(24e6)
}

// The fallback counter already ticks in nanoseconds.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn estimate() -> f64 {
    1e9
}

/// Times the counter against `Instant` over a few short sleeps and returns the
/// median rate, ignoring samples outside `reasonable`.
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
fn calibrate(reasonable: RangeInclusive<f64>) -> Option<f64> {
    use super::read_cycle_counter;
    use std::time::{Duration, Instant};

    const SAMPLES: usize = 3;
    const SLEEP: Duration = Duration::from_millis(10);

    let mut rates = Vec::with_capacity(SAMPLES);
    for _ in 0..SAMPLES {
        let start_cycles = read_cycle_counter();
        let start = Instant::now();

        std::thread::sleep(SLEEP);

        let cycles = read_cycle_counter().wrapping_sub(start_cycles);
        let secs = start.elapsed().as_secs_f64();
        if secs <= 0.0 {
            continue;
        }
        let hz = cycles as f64 / secs;
        if reasonable.contains(&hz) {
            rates.push(hz);
        }
    }

    if rates.is_empty() {
        return None;
    }
    rates.sort_by(f64::total_cmp);
    Some(rates[rates.len() / 2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_is_positive_and_cached() {
        let first = processor_frequency();
        assert!(first.is_finite() && first > 0.0);
        assert_eq!(processor_frequency(), first);
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    #[test]
    fn test_calibration_rejects_impossible_ranges() {
        // No real counter runs slower than one tick per second.
        assert_eq!(calibrate(0.0..=1.0), None);
    }
}
