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

//! # Vigil Core
//!
//! Foundational crate containing the log level and record types, and the
//! platform contracts (clocks, host queries, debug traps) that the rest of
//! Vigil is written against.

#![warn(missing_docs)]

pub mod clock;
pub mod level;
pub mod platform;
pub mod record;
pub mod utils;

pub use clock::ClockSource;
pub use level::{LogLevel, ParseLevelError};
pub use platform::{DebugTrap, HostInfo, NoopTrap};
pub use record::LogRecord;
pub use utils::time::{Timespec, Timeval};
pub use utils::timer::Stopwatch;
