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

//! Raw reads of the per-architecture cycle counter.

/// Reads the x86_64 Time Stamp Counter.
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn read_cycle_counter() -> u64 {
    // SAFETY: RDTSC is part of the x86_64 baseline and has no side effects.
    unsafe { core::arch::x86_64::_rdtsc() }
}

/// Reads the ARM64 virtual counter (CNTVCT_EL0).
#[cfg(target_arch = "aarch64")]
#[inline]
pub fn read_cycle_counter() -> u64 {
    let count: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 on every supported OS.
    unsafe {
        core::arch::asm!("mrs {}, cntvct_el0", out(reg) count, options(nomem, nostack));
    }
    count
}

/// Nanoseconds since the first read, offset by one so no reading is zero.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline]
pub fn read_cycle_counter() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    ANCHOR.get_or_init(Instant::now).elapsed().as_nanos() as u64 + 1
}

/// Human-readable name of the counter in use on this target.
pub fn counter_name() -> &'static str {
    if cfg!(target_arch = "x86_64") {
        "rdtsc"
    } else if cfg!(target_arch = "aarch64") {
        "cntvct_el0"
    } else {
        "monotonic-ns"
    }
}
