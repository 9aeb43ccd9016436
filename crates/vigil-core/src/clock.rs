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

//! The clock contract used by timers and periodic gates.

use std::fmt::Debug;

/// A source of wall-clock time and of a cheap, monotonic cycle counter.
///
/// Cycle counts are only comparable within one process run. Implementations
/// must never return a smaller count than an earlier call on the same thread.
pub trait ClockSource: Debug + Send + Sync {
    /// Current wall-clock time in seconds since the Unix epoch.
    fn now(&self) -> f64;

    /// Current reading of the cycle counter.
    fn cycle_count(&self) -> u64;

    /// Estimated counter ticks per second.
    ///
    /// Expected to be computed once and cached by the implementation.
    fn cycles_per_second(&self) -> f64;

    /// Converts an interval in seconds into a number of counter ticks.
    fn cycles_for(&self, seconds: f64) -> u64 {
        let cycles = (seconds * self.cycles_per_second()).round();
        if cycles.is_finite() && cycles > 0.0 {
            cycles as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FixedRate(f64);

    impl ClockSource for FixedRate {
        fn now(&self) -> f64 {
            0.0
        }
        fn cycle_count(&self) -> u64 {
            0
        }
        fn cycles_per_second(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_cycles_for_scales_by_rate() {
        let clock = FixedRate(2_000_000_000.0);
        assert_eq!(clock.cycles_for(0.5), 1_000_000_000);
        assert_eq!(clock.cycles_for(0.0), 0);
        assert_eq!(clock.cycles_for(-1.0), 0);
    }
}
