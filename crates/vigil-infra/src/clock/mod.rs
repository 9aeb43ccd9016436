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

//! The system clock: wall-clock time plus the hardware cycle counter.

mod counter;
mod frequency;

pub use counter::{counter_name, read_cycle_counter};
pub use frequency::processor_frequency;

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use vigil_core::ClockSource;

/// The process clock backed by the OS wall clock and the CPU cycle counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Returns the system clock as a shareable trait object.
    pub fn shared() -> Arc<dyn ClockSource> {
        Arc::new(SystemClock)
    }
}

impl ClockSource for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }

    fn cycle_count(&self) -> u64 {
        read_cycle_counter()
    }

    fn cycles_per_second(&self) -> f64 {
        processor_frequency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_now_is_after_2020() {
        assert!(SystemClock.now() > 1_577_836_800.0);
    }

    #[test]
    fn test_cycle_count_advances() {
        let clock = SystemClock;
        let before = clock.cycle_count();
        std::thread::sleep(Duration::from_millis(2));
        let after = clock.cycle_count();
        assert!(after > before, "{} should exceed {}", after, before);
    }

    #[test]
    fn test_cycles_for_one_second_matches_frequency() {
        let clock = SystemClock::shared();
        let hz = clock.cycles_per_second();
        assert!(hz > 0.0);
        assert_eq!(clock.cycles_for(1.0), hz.round() as u64);
    }
}
