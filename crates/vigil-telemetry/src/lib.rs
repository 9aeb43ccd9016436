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

//! # Vigil Telemetry
//!
//! Process-wide diagnostics for applications: leveled logging tagged with
//! source location, gates that sample or rate-limit a block of code, scoped
//! timers that accumulate into a caller's total, and a few process helpers.
//!
//! ```no_run
//! use vigil_telemetry::{every_n, log_info, log_warn, periodic, LogLevel, TimerBlock};
//!
//! vigil_telemetry::set_level(LogLevel::Info);
//!
//! let mut busy_secs = 0.0;
//! for frame in 0..10_000u32 {
//!     let _timer = TimerBlock::new(&mut busy_secs);
//!     every_n!(1_000, { log_info!("frame {}", frame); });
//!     periodic!(1.0, { log_warn!("still running at frame {}", frame); });
//! }
//! ```

#![warn(missing_docs)]

pub mod gate;
pub mod logger;
mod macros;
pub mod timer;

pub use gate::{GateError, PeriodicGate, SamplingGate};
pub use logger::{
    global, init, init_from_env, install_log_bridge, level, set_level, CaptureBuffer,
    ConfigError, FatalPolicy, InitError, LogSink, Logger, LoggerConfig, SinkTarget,
};
pub use timer::{time_into, Accumulate, TimerBlock};
pub use vigil_core::{LogLevel, LogRecord, Stopwatch, Timespec, Timeval};
pub use vigil_infra::processor_frequency;

use std::time::Duration;
use vigil_core::{ClockSource, DebugTrap};
use vigil_infra::{PlatformTrap, SystemClock};

/// Current wall-clock time in seconds since the Unix epoch.
pub fn now() -> f64 {
    SystemClock.now()
}

/// Current reading of the hardware cycle counter.
pub fn cycle_count() -> u64 {
    SystemClock.cycle_count()
}

/// The machine's hostname, looked up once per process.
pub fn hostname() -> &'static str {
    vigil_infra::hostname()
}

/// Suspends the calling thread for about `seconds`. Negative or NaN is a no-op.
pub fn sleep(seconds: f64) {
    if let Ok(duration) = Duration::try_from_secs_f64(seconds) {
        std::thread::sleep(duration);
    }
}

/// Stops in an attached debugger; does nothing visible without one.
pub fn breakpoint() {
    PlatformTrap::default().trap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_helper() {
        let watch = Stopwatch::new();
        sleep(0.01);
        assert!(watch.elapsed() >= Duration::from_millis(10));

        let watch = Stopwatch::new();
        sleep(-3.0);
        sleep(f64::NAN);
        assert!(watch.elapsed() < Duration::from_millis(10));
    }

    #[test]
    fn test_now_and_hostname() {
        assert!(now() > 1_577_836_800.0);
        assert!(!hostname().is_empty());
    }

    #[test]
    fn test_breakpoint_without_debugger() {
        breakpoint();
    }

    #[test]
    fn test_cycle_count_advances() {
        let before = cycle_count();
        sleep(0.002);
        assert!(cycle_count() > before);
    }
}
