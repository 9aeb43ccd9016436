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

//! Routes the `log` facade through a Vigil [`Logger`].
//!
//! Once the bridge is installed, `log::info!` and friends from any crate are
//! filtered by the Vigil level and written in the Vigil format. `log` has no
//! fatal level, so nothing arriving through the facade terminates the process.

use super::Logger;
use vigil_core::LogLevel;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.enabled(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = LogLevel::from(record.level());
        if !self.enabled(level) {
            return;
        }
        let file = record.file().unwrap_or_else(|| record.target());
        self.emit(level, file, record.line().unwrap_or(0), *record.args());
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

/// Installs the global logger as the `log` facade's backend.
///
/// Fails if another `log` backend is already installed.
pub fn install_log_bridge() -> Result<(), log::SetLoggerError> {
    log::set_logger(super::global())?;
    // Filtering happens in the Vigil logger so level changes apply immediately.
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{CaptureBuffer, LogSink, LoggerConfig};
    use log::Log;

    #[test]
    fn test_facade_records_are_filtered_by_vigil_level() {
        let buffer = CaptureBuffer::new();
        let logger = Logger::new(LoggerConfig::default().with_level(LogLevel::Warn))
            .with_sink(LogSink::writer(buffer.clone()))
            .with_hostname("bridge-host");

        let info = log::Record::builder()
            .level(log::Level::Info)
            .args(format_args!("quiet"))
            .file(Some("dep.rs"))
            .line(Some(4))
            .build();
        let error = log::Record::builder()
            .level(log::Level::Error)
            .args(format_args!("loud"))
            .file(Some("dep.rs"))
            .line(Some(5))
            .build();

        assert!(!Log::enabled(&logger, info.metadata()));
        Log::log(&logger, &info);
        Log::log(&logger, &error);

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[ERROR]"));
        assert!(lines[0].ends_with("bridge-host dep.rs:5 :: loud"));
    }

    #[test]
    fn test_missing_location_falls_back_to_target() {
        let buffer = CaptureBuffer::new();
        let logger = Logger::default().with_sink(LogSink::writer(buffer.clone()));

        let record = log::Record::builder()
            .level(log::Level::Warn)
            .target("my_crate::net")
            .args(format_args!("retrying"))
            .build();
        Log::log(&logger, &record);

        assert!(buffer.contents().contains(" my_crate::net:0 :: retrying"));
    }
}
