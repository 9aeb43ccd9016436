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

//! sysinfo-based implementation of the HostInfo trait.

use std::sync::{Arc, Mutex};
use sysinfo::System;
use vigil_core::HostInfo;

/// A host query service that uses the `sysinfo` crate.
#[derive(Debug, Clone)]
pub struct SysinfoHost {
    system: Arc<Mutex<System>>,
}

impl SysinfoHost {
    /// Creates a new SysinfoHost. No data is loaded until a query needs it.
    pub fn new() -> Self {
        Self {
            system: Arc::new(Mutex::new(System::new())),
        }
    }
}

impl HostInfo for SysinfoHost {
    fn hostname(&self) -> Option<String> {
        System::host_name()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }

    fn cpu_frequency_hz(&self) -> Option<f64> {
        let mut system = self.system.lock().ok()?;
        system.refresh_cpu_frequency();

        // sysinfo reports MHz per core; 0 means unknown.
        let mhz = system.cpus().iter().map(|cpu| cpu.frequency()).max()?;
        (mhz > 0).then(|| mhz as f64 * 1e6)
    }
}

impl Default for SysinfoHost {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_has_no_surrounding_whitespace() {
        if let Some(name) = SysinfoHost::new().hostname() {
            assert_eq!(name, name.trim());
            assert!(!name.is_empty());
        }
    }

    #[test]
    fn test_cpu_frequency_when_reported_is_positive() {
        if let Some(hz) = SysinfoHost::default().cpu_frequency_hz() {
            assert!(hz >= 1e6);
        }
    }
}
