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

//! Call-site macros for the global logger and for per-call-site gates.
//!
//! The logging macros fill in `file!()` and `line!()` and test the level
//! before the message arguments are evaluated, so a filtered call costs one
//! atomic load.

/// Logs at an explicit [`LogLevel`](crate::LogLevel) through the global logger.
#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {{
        let level: $crate::LogLevel = $level;
        let logger = $crate::global();
        if logger.enabled(level) {
            logger.emit(level, file!(), line!(), format_args!($($arg)+));
        }
    }};
}

/// Logs at `Debug`.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Debug, $($arg)+)
    };
}

/// Logs at `Info`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Info, $($arg)+)
    };
}

/// Logs at `Warn`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Warn, $($arg)+)
    };
}

/// Logs at `Error`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Error, $($arg)+)
    };
}

/// Logs at `Fatal` and terminates the process. Evaluates to `!`.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)+) => {
        $crate::global().fatal(file!(), line!(), format_args!($($arg)+))
    };
}

/// Logs at `Warn` with the last OS error appended.
///
/// The OS error is captured before the message arguments are evaluated.
#[macro_export]
macro_rules! log_perror {
    ($($arg:tt)+) => {{
        let os_error = ::std::io::Error::last_os_error();
        let logger = $crate::global();
        if logger.enabled($crate::LogLevel::Warn) {
            logger.emit_os_error(
                $crate::LogLevel::Warn,
                file!(),
                line!(),
                format_args!($($arg)+),
                &os_error,
            );
        }
    }};
}

/// Logs a fatal record with the last OS error appended if `cond` is false.
#[macro_export]
macro_rules! log_passert {
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            let os_error = ::std::io::Error::last_os_error();
            $crate::global().fatal_os_error(file!(), line!(), format_args!($($arg)+), &os_error)
        }
    };
}

/// Logs a fatal record if `cond` is false.
#[macro_export]
macro_rules! log_assert {
    ($cond:expr $(,)?) => {
        $crate::log_assert!($cond, "assertion failed: {}", stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            $crate::log_fatal!($($arg)+)
        }
    };
}

/// Runs the block on every Nth pass through this call site.
///
/// The gate lives in a `static`, so its count persists for the whole process
/// and is shared by every thread reaching this call site. An interval of zero
/// is fatal on first use.
#[macro_export]
macro_rules! every_n {
    ($n:expr, $body:block) => {{
        static GATE: ::std::sync::OnceLock<$crate::gate::SamplingGate> =
            ::std::sync::OnceLock::new();
        let gate = GATE.get_or_init(|| match $crate::gate::SamplingGate::new($n) {
            Ok(gate) => gate,
            Err(err) => $crate::log_fatal!("every_n!({}): {}", stringify!($n), err),
        });
        if gate.should_fire() $body
    }};
}

/// Runs the block at most once per `secs` seconds at this call site.
///
/// The first pass always runs. The interval is read once, on first use; a
/// non-positive interval is fatal on first use.
#[macro_export]
macro_rules! periodic {
    ($secs:expr, $body:block) => {{
        static GATE: ::std::sync::OnceLock<$crate::gate::PeriodicGate> =
            ::std::sync::OnceLock::new();
        let gate = GATE.get_or_init(|| match $crate::gate::PeriodicGate::new($secs) {
            Ok(gate) => gate,
            Err(err) => $crate::log_fatal!("periodic!({}): {}", stringify!($secs), err),
        });
        if gate.should_fire() $body
    }};
}
