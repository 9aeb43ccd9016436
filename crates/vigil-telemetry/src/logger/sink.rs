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

//! The single output a logger writes to.

use super::config::SinkTarget;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Where rendered records go.
pub enum LogSink {
    /// The process's standard error stream.
    Stderr,
    /// The process's standard output stream.
    Stdout,
    /// Any caller-supplied writer.
    Writer(Box<dyn Write + Send>),
}

impl LogSink {
    /// Wraps an arbitrary writer.
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        LogSink::Writer(Box::new(writer))
    }
}

impl From<SinkTarget> for LogSink {
    fn from(target: SinkTarget) -> Self {
        match target {
            SinkTarget::Stderr => LogSink::Stderr,
            SinkTarget::Stdout => LogSink::Stdout,
        }
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::Stderr => io::stderr().write(buf),
            LogSink::Stdout => io::stdout().write(buf),
            LogSink::Writer(writer) => writer.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // Lock once so the whole record lands in one piece.
        match self {
            LogSink::Stderr => io::stderr().lock().write_all(buf),
            LogSink::Stdout => io::stdout().lock().write_all(buf),
            LogSink::Writer(writer) => writer.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::Stderr => io::stderr().flush(),
            LogSink::Stdout => io::stdout().flush(),
            LogSink::Writer(writer) => writer.flush(),
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSink::Stderr => f.write_str("Stderr"),
            LogSink::Stdout => f.write_str("Stdout"),
            LogSink::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// An in-memory sink whose clones share one buffer.
///
/// Hand one clone to [`LogSink::writer`] and keep another to read back what
/// was logged.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Returns the written output split into lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes
            .lock()
            .map(|bytes| bytes.is_empty())
            .unwrap_or(false)
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        if let Ok(mut bytes) = self.bytes.lock() {
            bytes.clear();
        }
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_buffer_clones_share_storage() {
        let buffer = CaptureBuffer::new();
        let mut sink = LogSink::writer(buffer.clone());
        sink.write_all(b"first\nsecond\n").unwrap();

        assert_eq!(buffer.lines(), vec!["first", "second"]);
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sink_from_target() {
        assert!(matches!(LogSink::from(SinkTarget::Stdout), LogSink::Stdout));
        assert!(matches!(LogSink::from(SinkTarget::Stderr), LogSink::Stderr));
        assert_eq!(format!("{:?}", LogSink::writer(Vec::new())), "Writer(..)");
    }
}
