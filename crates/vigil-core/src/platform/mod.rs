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

//! Provides abstractions over platform-specific functionalities.
//!
//! This module contains the traits Vigil uses to ask the host about itself
//! and to interact with an attached debugger. Concrete implementations live in
//! `vigil-infra`.

/// Trait for querying the identity and capabilities of the host machine.
pub trait HostInfo: Send + Sync {
    /// Returns the machine's network name, if the platform reports one.
    fn hostname(&self) -> Option<String>;

    /// Returns the nominal CPU frequency in Hz, if the platform reports one.
    fn cpu_frequency_hz(&self) -> Option<f64>;
}

/// Trait for stopping in an attached debugger.
///
/// Implementations must be safe to call when no debugger is attached: the
/// trap is then a no-op from the program's point of view.
pub trait DebugTrap: Send + Sync {
    /// Raises a debugger-visible trap.
    fn trap(&self);
}

/// A [`DebugTrap`] that does nothing, for platforms without a trap signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrap;

impl DebugTrap for NoopTrap {
    fn trap(&self) {}
}
