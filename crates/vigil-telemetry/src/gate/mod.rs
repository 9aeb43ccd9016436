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

//! Execution gates: stateful decisions about whether a block should run now.
//!
//! A [`SamplingGate`] lets every Nth call through; a [`PeriodicGate`] lets at
//! most one call through per time window, measured on the cycle counter.
//! Build a gate once and keep it (a field, a `static`) for as long as the call
//! site lives; the [`every_n!`](crate::every_n) and
//! [`periodic!`](crate::periodic) macros do exactly that for you.

mod periodic;
mod sampling;

pub use periodic::PeriodicGate;
pub use sampling::SamplingGate;

/// A gate was configured with an interval it cannot honour.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GateError {
    /// A sampling gate needs an interval of at least one call.
    #[error("sampling interval must be at least 1 call")]
    ZeroInterval,
    /// A periodic gate needs a finite, positive number of seconds.
    #[error("periodic interval must be a positive, finite number of seconds (got {0})")]
    InvalidPeriod(f64),
}
