// SysBridge - platform/console.rs
//
// Default log sink: one line per message on stderr.

use crate::core::services::LogSink;
use std::io::Write;

/// Writes each message as a line on the process's stderr.
///
/// Write failures (closed stderr, broken pipe) are swallowed: logging
/// through the facade never fails observably.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn log(&self, message: &str) {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{message}");
    }
}
