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

//! The level-filtered logger and the process-wide instance behind the macros.
//!
//! A [`Logger`] owns its current level, the sink it writes to, and the policy
//! applied after a fatal record. The call-site macros talk to the global
//! logger returned by [`global`]; code that wants explicit ownership can build
//! its own `Logger` and call [`Logger::emit`] directly.
//!
//! # Thread safety
//!
//! The current level is an `AtomicU8` read and written with relaxed ordering:
//! a thread may observe a level change late, but never a partial value. Writes
//! to the sink are serialized by one mutex per logger, so concurrent records
//! never interleave within a line.

mod bridge;
mod config;
mod sink;

pub use bridge::install_log_bridge;
pub use config::{ConfigError, FatalPolicy, LoggerConfig, SinkTarget, FATAL_ENV, LEVEL_ENV};
pub use sink::{CaptureBuffer, LogSink};

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use vigil_core::{ClockSource, LogLevel, LogRecord};
use vigil_infra::SystemClock;

/// Writes leveled, source-tagged records to a single sink.
#[derive(Debug)]
pub struct Logger {
    level: AtomicU8,
    fatal_policy: FatalPolicy,
    hostname: String,
    clock: Arc<dyn ClockSource>,
    sink: Mutex<LogSink>,
}

impl Logger {
    /// Creates a logger from `config`, using the system clock and the cached
    /// machine hostname.
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            level: AtomicU8::new(config.level as u8),
            fatal_policy: config.fatal,
            hostname: vigil_infra::hostname().to_string(),
            clock: SystemClock::shared(),
            sink: Mutex::new(LogSink::from(config.sink)),
        }
    }

    /// Replaces the sink records are written to.
    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = Mutex::new(sink);
        self
    }

    /// Replaces the clock used to timestamp records.
    pub fn with_clock(mut self, clock: Arc<dyn ClockSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Overrides the hostname written in every record.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Returns the current level.
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Sets the current level. Takes effect for subsequent calls on every thread.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Returns the policy applied after a fatal record.
    pub fn fatal_policy(&self) -> FatalPolicy {
        self.fatal_policy
    }

    /// Returns the hostname written in every record.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Returns `true` if a record at `level` would be written.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    /// Writes a record if `level` passes the filter.
    ///
    /// A `Fatal` record always passes and does not return: the process is
    /// terminated according to the fatal policy once the record is flushed.
    pub fn emit(&self, level: LogLevel, file: &str, line: u32, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let rendered = self.write_record(level, file, line, args);
        if level == LogLevel::Fatal {
            self.terminate(&rendered);
        }
    }

    /// Like [`emit`](Self::emit), with ` :: (System error: ...)` appended.
    pub fn emit_os_error(
        &self,
        level: LogLevel,
        file: &str,
        line: u32,
        args: fmt::Arguments<'_>,
        error: &io::Error,
    ) {
        self.emit(
            level,
            file,
            line,
            format_args!("{} :: (System error: {})", args, error),
        );
    }

    /// Writes a fatal record and terminates the process.
    pub fn fatal(&self, file: &str, line: u32, args: fmt::Arguments<'_>) -> ! {
        let rendered = self.write_record(LogLevel::Fatal, file, line, args);
        self.terminate(&rendered)
    }

    /// Writes a fatal record with the OS error suffix and terminates the process.
    pub fn fatal_os_error(
        &self,
        file: &str,
        line: u32,
        args: fmt::Arguments<'_>,
        error: &io::Error,
    ) -> ! {
        self.fatal(
            file,
            line,
            format_args!("{} :: (System error: {})", args, error),
        )
    }

    /// Flushes the sink.
    pub fn flush(&self) {
        let _ = self.lock_sink().flush();
    }

    fn write_record(
        &self,
        level: LogLevel,
        file: &str,
        line: u32,
        args: fmt::Arguments<'_>,
    ) -> String {
        let rendered = LogRecord {
            level,
            file,
            line,
            timestamp: self.clock.now(),
            hostname: &self.hostname,
            message: args,
        }
        .render();

        let mut sink = self.lock_sink();
        // Nowhere left to report a failed diagnostic write.
        if sink.write_all(rendered.as_bytes()).is_ok() {
            let _ = sink.flush();
        }
        rendered
    }

    // A panic while holding the lock must not silence later records,
    // least of all a fatal one.
    fn lock_sink(&self) -> std::sync::MutexGuard<'_, LogSink> {
        self.sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn terminate(&self, rendered: &str) -> ! {
        match self.fatal_policy {
            FatalPolicy::Abort => std::process::abort(),
            FatalPolicy::Exit(code) => std::process::exit(if code == 0 { 1 } else { code }),
            FatalPolicy::Panic => panic!("{}", rendered.trim_end()),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Returns the process-wide logger, creating a default one (level `Info`,
/// stderr, abort on fatal) if [`init`] was never called.
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::default)
}

/// Installs `logger` as the process-wide logger.
///
/// Fails if the global logger was already installed or already used.
pub fn init(logger: Logger) -> Result<&'static Logger, InitError> {
    GLOBAL
        .set(logger)
        .map_err(|_| InitError::AlreadyInitialized)?;
    Ok(global())
}

/// Builds the global logger from the `VIGIL_LOG` / `VIGIL_FATAL` environment.
pub fn init_from_env() -> Result<&'static Logger, InitError> {
    let config = LoggerConfig::from_env()?;
    init(Logger::new(config))
}

/// Returns the current level of the global logger.
pub fn level() -> LogLevel {
    global().level()
}

/// Sets the current level of the global logger.
pub fn set_level(level: LogLevel) {
    global().set_level(level);
}

/// An error that can occur while installing the global logger.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The global logger was installed, or used, before this call.
    #[error("the global logger is already initialized")]
    AlreadyInitialized,
    /// The environment held an invalid setting.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
