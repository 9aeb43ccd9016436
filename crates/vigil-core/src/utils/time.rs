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

//! Conversions from floating-point seconds into split second/fraction pairs.

/// Whole seconds plus microseconds, as used by `select`-style timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timeval {
    /// Whole seconds.
    pub sec: i64,
    /// Microseconds, always in `0..1_000_000`.
    pub usec: i64,
}

/// Whole seconds plus nanoseconds, as used by `nanosleep`-style calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timespec {
    /// Whole seconds.
    pub sec: i64,
    /// Nanoseconds, always in `0..1_000_000_000`.
    pub nsec: i64,
}

// Floors toward negative infinity so the fraction stays non-negative.
fn split(t: f64, units_per_sec: f64) -> (i64, i64) {
    if !t.is_finite() {
        return (0, 0);
    }
    let sec = t.floor();
    let frac = ((t - sec) * units_per_sec).round() as i64;
    let units = units_per_sec as i64;
    if frac >= units {
        (sec as i64 + 1, frac - units)
    } else {
        (sec as i64, frac)
    }
}

impl Timeval {
    /// Splits `t` seconds into seconds and microseconds.
    pub fn from_secs_f64(t: f64) -> Self {
        let (sec, usec) = split(t, 1e6);
        Self { sec, usec }
    }

    /// Converts back to floating-point seconds.
    pub fn as_secs_f64(&self) -> f64 {
        self.sec as f64 + self.usec as f64 / 1e6
    }
}

impl Timespec {
    /// Splits `t` seconds into seconds and nanoseconds.
    pub fn from_secs_f64(t: f64) -> Self {
        let (sec, nsec) = split(t, 1e9);
        Self { sec, nsec }
    }

    /// Converts back to floating-point seconds.
    pub fn as_secs_f64(&self) -> f64 {
        self.sec as f64 + self.nsec as f64 / 1e9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeval_split() {
        assert_eq!(
            Timeval::from_secs_f64(2.5),
            Timeval {
                sec: 2,
                usec: 500_000
            }
        );
        assert_eq!(
            Timeval::from_secs_f64(-0.25),
            Timeval {
                sec: -1,
                usec: 750_000
            }
        );
    }

    #[test]
    fn test_timespec_split() {
        let ts = Timespec::from_secs_f64(1.000_000_001);
        assert_eq!(ts.sec, 1);
        assert!((ts.nsec - 1).abs() <= 1);
        assert!((ts.as_secs_f64() - 1.000_000_001).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_carries_into_seconds() {
        let tv = Timeval::from_secs_f64(0.999_999_9);
        assert_eq!(tv, Timeval { sec: 1, usec: 0 });
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(Timespec::from_secs_f64(f64::NAN), Timespec::default());
        assert_eq!(Timeval::from_secs_f64(f64::INFINITY), Timeval::default());
    }
}
