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

//! Time-window gating on the cycle counter.

use super::GateError;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use vigil_core::ClockSource;
use vigil_infra::SystemClock;

const NEVER_FIRED: u64 = u64::MAX;

/// Lets at most one call through per configured interval.
///
/// Elapsed time is measured in cycle-counter ticks, which are far cheaper to
/// read than the wall clock. The interval is converted to ticks once, on the
/// first call, using the clock's frequency estimate. The first call always
/// fires.
///
/// When several threads share a gate, exactly one of them claims each window;
/// the skip counter is best effort under contention.
#[derive(Debug)]
pub struct PeriodicGate {
    interval_secs: f64,
    clock: Arc<dyn ClockSource>,
    threshold: OnceLock<u64>,
    last_fired: AtomicU64,
    skipped: AtomicU32,
}

impl PeriodicGate {
    /// Creates a gate that fires at most once every `interval_secs` seconds.
    pub fn new(interval_secs: f64) -> Result<Self, GateError> {
        Self::with_clock(interval_secs, SystemClock::shared())
    }

    /// Creates a gate that reads time from `clock`.
    pub fn with_clock(interval_secs: f64, clock: Arc<dyn ClockSource>) -> Result<Self, GateError> {
        if !interval_secs.is_finite() || interval_secs <= 0.0 {
            return Err(GateError::InvalidPeriod(interval_secs));
        }
        Ok(Self {
            interval_secs,
            clock,
            threshold: OnceLock::new(),
            last_fired: AtomicU64::new(NEVER_FIRED),
            skipped: AtomicU32::new(0),
        })
    }

    /// Returns the configured interval in seconds.
    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    /// Returns the window length in counter ticks, computing it on first use.
    pub fn threshold_cycles(&self) -> u64 {
        *self
            .threshold
            .get_or_init(|| self.clock.cycles_for(self.interval_secs))
    }

    /// Returns how many calls were skipped since the gate last fired.
    pub fn skipped(&self) -> u32 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Returns `true` if more than one interval has passed since the gate
    /// last fired, and starts a new window.
    pub fn should_fire(&self) -> bool {
        let threshold = self.threshold_cycles();
        let now = self.clock.cycle_count();
        let last = self.last_fired.load(Ordering::Relaxed);

        let due = last == NEVER_FIRED || now.saturating_sub(last) > threshold;
        if due
            && self
                .last_fired
                .compare_exchange(last, now, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
        {
            self.skipped.store(0, Ordering::Relaxed);
            return true;
        }

        self.skipped.fetch_add(1, Ordering::Relaxed);
        false
    }

    /// Runs `f` if this call fires.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        self.should_fire().then(f)
    }
}
