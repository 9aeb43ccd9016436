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

//! Every-Nth-call gating.

use super::GateError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lets exactly every Nth call through, counted from the first call.
///
/// The counter is incremented before it is tested, so the first call to get
/// through is call N (call 1 when N is 1). Increments are atomic: concurrent
/// callers never lose a count.
#[derive(Debug)]
pub struct SamplingGate {
    interval: u64,
    calls: AtomicU64,
}

impl SamplingGate {
    /// Creates a gate that fires on calls N, 2N, 3N...
    pub fn new(interval: u64) -> Result<Self, GateError> {
        if interval == 0 {
            return Err(GateError::ZeroInterval);
        }
        Ok(Self {
            interval,
            calls: AtomicU64::new(0),
        })
    }

    /// Returns the configured N.
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Returns how many times the gate has been consulted.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Counts this call and returns `true` if it is a multiple of N.
    #[inline]
    pub fn should_fire(&self) -> bool {
        let call = self.calls.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        call % self.interval == 0
    }

    /// Runs `f` if this call fires.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        self.should_fire().then(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_is_rejected() {
        assert_eq!(SamplingGate::new(0).unwrap_err(), GateError::ZeroInterval);
    }

    #[test]
    fn test_fires_floor_m_over_n_times() {
        for n in 1..=7u64 {
            for m in 0..=30u64 {
                let gate = SamplingGate::new(n).unwrap();
                let fired = (0..m).filter(|_| gate.should_fire()).count() as u64;
                assert_eq!(fired, m / n, "n={n} m={m}");
                assert_eq!(gate.calls(), m);
            }
        }
    }

    #[test]
    fn test_first_fire_is_on_call_n() {
        let gate = SamplingGate::new(4).unwrap();
        let first = (1..=10).find(|_| gate.should_fire());
        assert_eq!(first, Some(4));
    }

    #[test]
    fn test_interval_one_fires_every_call() {
        let gate = SamplingGate::new(1).unwrap();
        assert!((0..100).all(|_| gate.should_fire()));
    }

    #[test]
    fn test_run_returns_value_only_when_firing() {
        let gate = SamplingGate::new(2).unwrap();
        assert_eq!(gate.run(|| "odd"), None);
        assert_eq!(gate.run(|| "even"), Some("even"));
    }

    #[test]
    fn test_concurrent_calls_are_counted_exactly() {
        let gate = std::sync::Arc::new(SamplingGate::new(10).unwrap());
        let fired = std::sync::Arc::new(AtomicU64::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = gate.clone();
                let fired = fired.clone();
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        if gate.should_fire() {
                            fired.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(gate.calls(), 8_000);
        assert_eq!(fired.load(Ordering::Relaxed), 800);
    }
}
