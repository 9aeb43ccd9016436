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

//! A debugger trap built on SIGTRAP.
//!
//! With a debugger attached, raising SIGTRAP stops the process in it. Without
//! one, the default action would kill the process, so the signal is ignored for
//! the duration of the raise and the previous disposition is put back.

#![cfg(unix)]

use vigil_core::DebugTrap;

/// Raises SIGTRAP with the signal temporarily ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalTrap;

impl DebugTrap for SignalTrap {
    fn trap(&self) {
        // SAFETY: both sigaction structs are fully initialised before use and
        // the previous disposition is restored before returning.
        unsafe {
            let mut ignore: libc::sigaction = std::mem::zeroed();
            ignore.sa_sigaction = libc::SIG_IGN;
            libc::sigemptyset(&mut ignore.sa_mask);

            let mut previous: libc::sigaction = std::mem::zeroed();
            if libc::sigaction(libc::SIGTRAP, &ignore, &mut previous) != 0 {
                log::warn!(
                    "Could not ignore SIGTRAP, skipping breakpoint: {}",
                    std::io::Error::last_os_error()
                );
                return;
            }

            libc::raise(libc::SIGTRAP);

            if libc::sigaction(libc::SIGTRAP, &previous, std::ptr::null_mut()) != 0 {
                log::warn!(
                    "Could not restore the SIGTRAP handler: {}",
                    std::io::Error::last_os_error()
                );
            }
        }
    }
}
