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

//! Provides RAII-based timers that add the duration of a scope into a
//! caller-owned total. (RAII = Resource Acquisition Is Initialization)

use std::time::Duration;
use vigil_core::Stopwatch;

/// A running total that elapsed time can be added to.
pub trait Accumulate {
    /// Adds `elapsed` to the total.
    fn accumulate(&mut self, elapsed: Duration);
}

/// Seconds, as a float.
impl Accumulate for f64 {
    fn accumulate(&mut self, elapsed: Duration) {
        *self += elapsed.as_secs_f64();
    }
}

impl Accumulate for Duration {
    fn accumulate(&mut self, elapsed: Duration) {
        *self = self.saturating_add(elapsed);
    }
}

/// Times the scope it lives in and adds the result to a total when dropped.
///
/// The total is updated exactly once per timer, on every way out of the
/// scope: falling through, an early `return`, a `?`, or a panic unwinding.
///
/// ```
/// use vigil_telemetry::TimerBlock;
///
/// let mut io_secs = 0.0;
/// for _ in 0..3 {
///     let _timer = TimerBlock::new(&mut io_secs);
///     // ... work ...
/// }
/// assert!(io_secs >= 0.0);
/// ```
#[must_use = "the time is recorded when the timer is dropped; bind it to a variable"]
pub struct TimerBlock<'a, A: Accumulate + ?Sized = f64> {
    stopwatch: Stopwatch,
    total: &'a mut A,
}

impl<'a, A: Accumulate + ?Sized> TimerBlock<'a, A> {
    /// Starts timing into `total`.
    pub fn new(total: &'a mut A) -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            total,
        }
    }

    /// Time elapsed since the timer started. Nothing is recorded until drop.
    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }
}

/// When the timer goes out of scope, it adds the elapsed time to the total.
impl<A: Accumulate + ?Sized> Drop for TimerBlock<'_, A> {
    fn drop(&mut self) {
        self.total.accumulate(self.stopwatch.elapsed());
    }
}

/// Runs `f` and adds its running time to `total`, however `f` exits.
pub fn time_into<A, R>(total: &mut A, f: impl FnOnce() -> R) -> R
where
    A: Accumulate + ?Sized,
{
    let _timer = TimerBlock::new(total);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::thread::sleep;

    // Generous upper bound for scheduler jitter on loaded machines.
    const TOLERANCE: f64 = 0.1;

    #[test]
    fn test_sleep_is_accumulated() {
        let mut total = 0.0;
        {
            let _timer = TimerBlock::new(&mut total);
            sleep(Duration::from_millis(50));
        }
        assert!(total >= 0.05, "{total}");
        assert!(total < 0.05 + TOLERANCE, "{total}");
    }

    #[test]
    fn test_repeated_entries_sum() {
        let mut total = 0.0;
        for ms in [10, 20, 30] {
            let _timer = TimerBlock::new(&mut total);
            sleep(Duration::from_millis(ms));
        }
        assert!(total >= 0.06, "{total}");
        assert!(total < 0.06 + TOLERANCE, "{total}");
    }

    #[test]
    fn test_early_return_and_error_paths_are_recorded() {
        fn early(total: &mut f64, bail: bool) -> u32 {
            let _timer = TimerBlock::new(total);
            sleep(Duration::from_millis(10));
            if bail {
                return 1;
            }
            2
        }

        fn failing(total: &mut f64) -> Result<(), std::num::ParseIntError> {
            let _timer = TimerBlock::new(total);
            sleep(Duration::from_millis(10));
            "nope".parse::<u32>()?;
            Ok(())
        }

        let mut total = 0.0;
        assert_eq!(early(&mut total, true), 1);
        assert!(failing(&mut total).is_err());
        assert!(total >= 0.02, "{total}");
    }

    #[test]
    fn test_panic_unwind_is_recorded() {
        let mut total = 0.0;
        let result = catch_unwind(AssertUnwindSafe(|| {
            time_into(&mut total, || {
                sleep(Duration::from_millis(10));
                panic!("work failed");
            })
        }));
        assert!(result.is_err());
        assert!(total >= 0.01, "{total}");
    }

    #[test]
    fn test_duration_total_and_return_value() {
        let mut total = Duration::ZERO;
        let value = time_into(&mut total, || {
            sleep(Duration::from_millis(5));
            42
        });
        assert_eq!(value, 42);
        assert!(total >= Duration::from_millis(5));
    }

    #[test]
    fn test_elapsed_reports_running_time() {
        let mut total = 0.0;
        let timer = TimerBlock::new(&mut total);
        sleep(Duration::from_millis(2));
        assert!(timer.elapsed() >= Duration::from_millis(2));
        drop(timer);
        assert!(total > 0.0);
    }
}
