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

//! The ephemeral record built for every emitted log call.

use crate::level::LogLevel;
use std::fmt::{self, Display, Write};

/// One log call that passed the level filter.
///
/// A record borrows everything it needs from the call site and the logger;
/// it is rendered to a single line and dropped. Line breaks in the message
/// are written as the escapes `\n` and `\r`.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    /// Severity of the call.
    pub level: LogLevel,
    /// Source file of the call site.
    pub file: &'a str,
    /// Source line of the call site.
    pub line: u32,
    /// Wall-clock time of the call, in seconds since the Unix epoch.
    pub timestamp: f64,
    /// Name of the machine the process runs on.
    pub hostname: &'a str,
    /// The caller's message, not yet rendered.
    pub message: fmt::Arguments<'a>,
}

impl<'a> LogRecord<'a> {
    /// Renders the record as one newline-terminated output line.
    ///
    /// Layout: `[TAG  ] <secs.micros> <hostname> <file>:<line> :: <message>`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(96);
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{self}");
        out
    }
}

impl Display for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:.6} {} {}:{} :: ",
            self.level.tag(),
            self.timestamp,
            self.hostname,
            self.file,
            self.line,
        )?;
        fmt::write(&mut SingleLine(f), self.message)
    }
}

/// Forwards text with `\n` and `\r` replaced by their escaped forms.
struct SingleLine<'a, 'b>(&'a mut fmt::Formatter<'b>);

impl Write for SingleLine<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut rest = s;
        while let Some(pos) = rest.find(['\n', '\r']) {
            self.0.write_str(&rest[..pos])?;
            let escaped = if rest.as_bytes()[pos] == b'\n' { "\\n" } else { "\\r" };
            self.0.write_str(escaped)?;
            rest = &rest[pos + 1..];
        }
        self.0.write_str(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let user = "alice";
        let line = LogRecord {
            level: LogLevel::Warn,
            file: "src/main.rs",
            line: 42,
            timestamp: 1_700_000_000.25,
            hostname: "build-01",
            message: format_args!("disk almost full for {user}"),
        }
        .render();

        assert_eq!(
            line,
            "[WARN ] 1700000000.250000 build-01 src/main.rs:42 :: disk almost full for alice\n"
        );
    }

    #[test]
    fn test_render_is_single_line() {
        let line = LogRecord {
            level: LogLevel::Debug,
            file: "a.rs",
            line: 1,
            timestamp: 0.0,
            hostname: "h",
            message: format_args!("x"),
        }
        .render();
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_multiline_message_stays_on_one_line() {
        let detail = "second\r\nthird";
        let line = LogRecord {
            level: LogLevel::Error,
            file: "a.rs",
            line: 1,
            timestamp: 0.0,
            hostname: "h",
            message: format_args!("first\n{detail}"),
        }
        .render();

        assert_eq!(line.matches('\n').count(), 1);
        assert!(!line.contains('\r'));
        assert_eq!(
            line,
            "[ERROR] 0.000000 h a.rs:1 :: first\\nsecond\\r\\nthird\n"
        );
    }
}
