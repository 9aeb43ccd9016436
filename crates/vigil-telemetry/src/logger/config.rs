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

//! Logger configuration: level, fatal policy, and output target.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use vigil_core::{LogLevel, ParseLevelError};

/// Environment variable holding the initial level (`debug` .. `fatal`).
pub const LEVEL_ENV: &str = "VIGIL_LOG";
/// Environment variable holding the fatal policy (`abort`, `panic`, `exit`, `exit:<code>`).
pub const FATAL_ENV: &str = "VIGIL_FATAL";

/// What happens after a fatal record has been written and flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatalPolicy {
    /// Abort the process (SIGABRT on unix), leaving a core dump if enabled.
    #[default]
    Abort,
    /// Exit with the given status. A status of 0 is replaced by 1.
    Exit(i32),
    /// Panic with the rendered record. Lets test harnesses observe fatals.
    Panic,
}

impl FromStr for FatalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if let Some(code) = s.strip_prefix("exit:") {
            return code.parse().map(FatalPolicy::Exit).map_err(|_| s.clone());
        }
        match s.as_str() {
            "abort" => Ok(FatalPolicy::Abort),
            "panic" => Ok(FatalPolicy::Panic),
            "exit" => Ok(FatalPolicy::Exit(1)),
            _ => Err(s.clone()),
        }
    }
}

/// The stream a logger built from configuration writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkTarget {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

/// Settings for building a [`Logger`](super::Logger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Initial minimum level.
    pub level: LogLevel,
    /// Policy applied after a fatal record.
    pub fatal: FatalPolicy,
    /// Output stream.
    pub sink: SinkTarget,
}

impl LoggerConfig {
    /// Reads [`LEVEL_ENV`] and [`FATAL_ENV`]; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(LEVEL_ENV) {
            config.level = raw.parse::<LogLevel>().map_err(|source| ConfigError::InvalidLevel {
                var: LEVEL_ENV,
                source,
            })?;
        }
        if let Some(raw) = lookup(FATAL_ENV) {
            config.fatal = raw
                .parse::<FatalPolicy>()
                .map_err(|value| ConfigError::InvalidFatalPolicy {
                    var: FATAL_ENV,
                    value,
                })?;
        }

        Ok(config)
    }

    /// Sets the initial level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the fatal policy.
    pub fn with_fatal(mut self, fatal: FatalPolicy) -> Self {
        self.fatal = fatal;
        self
    }

    /// Sets the output stream.
    pub fn with_sink(mut self, sink: SinkTarget) -> Self {
        self.sink = sink;
        self
    }
}

/// An error in logger configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A level variable did not name a level.
    #[error("invalid value in {var}")]
    InvalidLevel {
        /// The variable that was read.
        var: &'static str,
        /// The parse failure.
        #[source]
        source: ParseLevelError,
    },
    /// A fatal-policy variable was not recognised.
    #[error("invalid value `{value}` in {var} (expected abort, panic, exit or exit:<code>)")]
    InvalidFatalPolicy {
        /// The variable that was read.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = LoggerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.fatal, FatalPolicy::Abort);
        assert_eq!(config.sink, SinkTarget::Stderr);
    }

    #[test]
    fn test_reads_level_and_policy() {
        let config =
            LoggerConfig::from_lookup(lookup(&[(LEVEL_ENV, "Warn"), (FATAL_ENV, "exit:3")]))
                .unwrap();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.fatal, FatalPolicy::Exit(3));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = LoggerConfig::from_lookup(lookup(&[(LEVEL_ENV, "chatty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel { var: LEVEL_ENV, .. }));

        let err = LoggerConfig::from_lookup(lookup(&[(FATAL_ENV, "exit:x")])).unwrap_err();
        assert!(err.to_string().contains("exit:x"));
    }

    #[test]
    fn test_fatal_policy_parse() {
        assert_eq!("PANIC".parse::<FatalPolicy>(), Ok(FatalPolicy::Panic));
        assert_eq!("exit".parse::<FatalPolicy>(), Ok(FatalPolicy::Exit(1)));
        assert_eq!("exit:-2".parse::<FatalPolicy>(), Ok(FatalPolicy::Exit(-2)));
        assert!("quit".parse::<FatalPolicy>().is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{ "level": "debug", "fatal": { "exit": 7 } }"#).unwrap();
        assert_eq!(
            config,
            LoggerConfig::default()
                .with_level(LogLevel::Debug)
                .with_fatal(FatalPolicy::Exit(7))
        );

        let config: LoggerConfig = serde_json::from_str(r#"{ "sink": "stdout" }"#).unwrap();
        assert_eq!(config.sink, SinkTarget::Stdout);
        assert_eq!(config.level, LogLevel::Info);
    }
}
