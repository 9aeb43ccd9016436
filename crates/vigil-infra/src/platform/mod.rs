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

//! Host-platform implementations of the `vigil-core` platform traits.

mod signal_trap;
mod sysinfo_impl;

#[cfg(unix)]
pub use signal_trap::SignalTrap;
pub use sysinfo_impl::SysinfoHost;

use std::sync::OnceLock;
use vigil_core::HostInfo;

/// The debugger trap used by default on this platform.
#[cfg(unix)]
pub type PlatformTrap = SignalTrap;

/// The debugger trap used by default on this platform.
#[cfg(not(unix))]
pub type PlatformTrap = vigil_core::NoopTrap;

/// Placeholder used when the OS does not report a hostname.
pub const UNKNOWN_HOST: &str = "unknown-host";

/// Returns the machine's hostname, queried once and cached for the process.
pub fn hostname() -> &'static str {
    static HOSTNAME: OnceLock<String> = OnceLock::new();

    HOSTNAME.get_or_init(|| {
        SysinfoHost::new().hostname().unwrap_or_else(|| {
            log::warn!("Host name unavailable, using `{}`", UNKNOWN_HOST);
            UNKNOWN_HOST.to_string()
        })
    })
}
