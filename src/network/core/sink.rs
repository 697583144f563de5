//! Line-oriented output destinations for formatters.
//!
//! An [`OutputSink`] is a cheap cloneable handle. Every line is written and
//! flushed while holding the sink's lock so tailing consumers see each event
//! as soon as it is produced, and lines from counters sharing a sink never
//! interleave.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use log::debug;

use crate::error::{MeterError, Result};

struct SinkState {
    writer: Option<Box<dyn Write + Send>>,
}

/// Shared handle to a writable destination.
#[derive(Clone)]
pub struct OutputSink {
    state: Arc<Mutex<SinkState>>,
    label: Arc<str>,
    /// Whether finalizing the owner should close the destination
    owned: bool,
    /// Whether ANSI colors may be written
    color: bool,
}

impl OutputSink {
    fn new(label: &str, writer: Box<dyn Write + Send>, owned: bool, color: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(SinkState {
                writer: Some(writer),
            })),
            label: Arc::from(label),
            owned,
            color,
        }
    }

    /// Standard output. Not owned; colored when attached to a terminal.
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal();
        Self::new("stdout", Box::new(io::stdout()), false, color)
    }

    /// Creates (truncates) the file at `path`. The sink owns it and closes it on finalize.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        debug!("Opened stats output file {}", path.display());
        Ok(Self::new(&path.display().to_string(), Box::new(file), true, false))
    }

    /// Wraps an already opened destination. The caller keeps ownership.
    pub fn from_writer(label: &str, writer: impl Write + Send + 'static) -> Self {
        Self::new(label, Box::new(writer), false, false)
    }

    /// Resolves an optional path: `None` is stdout, a path is an owned file.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::create(path),
            None => Ok(Self::stdout()),
        }
    }

    /// Returns a handle to the same destination that will never close it.
    pub fn borrowed(&self) -> Self {
        Self {
            owned: false,
            ..self.clone()
        }
    }

    pub fn with_ownership(mut self, owned: bool) -> Self {
        self.owned = owned;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }

    /// Writes `line` followed by a newline, then flushes.
    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| MeterError::lock_poisoned(&self.label))?;
        let writer = state
            .writer
            .as_mut()
            .ok_or_else(|| MeterError::sink_closed(&self.label))?;

        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Flushes and releases the destination. Later writes fail with `SinkClosed`.
    ///
    /// Closing an already closed sink is a no-op.
    pub fn close(&self) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| MeterError::lock_poisoned(&self.label))?;

        if let Some(mut writer) = state.writer.take() {
            writer.flush()?;
            debug!("Closed stats output {}", self.label);
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.state
            .lock()
            .map(|state| state.writer.is_none())
            .unwrap_or(true)
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSink")
            .field("label", &self.label)
            .field("owned", &self.owned)
            .field("color", &self.color)
            .finish()
    }
}

/// In-memory destination that can be inspected after being handed to a sink.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        self.bytes
            .lock()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "capture buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Writer that counts lines, flushes and releases of the destination.
    #[derive(Clone, Default)]
    pub(crate) struct FlushCounter {
        lines: Arc<AtomicUsize>,
        flushes: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
    }

    impl FlushCounter {
        pub(crate) fn lines(&self) -> usize {
            self.lines.load(Ordering::SeqCst)
        }

        pub(crate) fn flushes(&self) -> usize {
            self.flushes.load(Ordering::SeqCst)
        }

        pub(crate) fn released(&self) -> usize {
            self.released.load(Ordering::SeqCst)
        }
    }

    impl Write for FlushCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let newlines = buf.iter().filter(|&&b| b == b'\n').count();
            self.lines.fetch_add(newlines, Ordering::SeqCst);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Handed to the sink boxed, so dropping it means the sink let go.
    pub(crate) struct Tracked(pub(crate) FlushCounter);

    impl Write for Tracked {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.0.flush()
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_write_line_appends_newline() {
        let buffer = CaptureBuffer::new();
        let sink = OutputSink::from_writer("memory", buffer.clone());

        sink.write_line("first").unwrap();
        sink.write_line("second").unwrap();

        assert_eq!(buffer.contents(), "first\nsecond\n");
        assert!(!sink.is_owned());
    }

    #[test]
    fn test_write_after_close_fails() {
        let sink = OutputSink::from_writer("memory", CaptureBuffer::new());
        sink.close().unwrap();
        sink.close().unwrap();

        assert!(sink.is_closed());
        assert!(matches!(
            sink.write_line("late"),
            Err(MeterError::SinkClosed(_))
        ));
    }

    #[test]
    fn test_close_flushes_and_releases_once() {
        let counter = FlushCounter::default();
        let sink = OutputSink::from_writer("counted", Tracked(counter.clone()));

        sink.write_line("only").unwrap();
        sink.close().unwrap();
        sink.close().unwrap();

        assert_eq!(counter.lines(), 1);
        assert_eq!(counter.flushes(), 2);
        assert_eq!(counter.released(), 1);
    }

    #[test]
    fn test_clones_share_destination() {
        let buffer = CaptureBuffer::new();
        let sink = OutputSink::from_writer("memory", buffer.clone()).with_ownership(true);
        let shared = sink.borrowed();

        shared.write_line("from clone").unwrap();
        assert!(sink.is_owned());
        assert!(!shared.is_owned());
        assert_eq!(buffer.lines(), vec!["from clone"]);

        sink.close().unwrap();
        assert!(shared.is_closed());
    }

    #[test]
    fn test_create_owns_file() {
        let path = std::env::temp_dir().join(format!("pktmeter-sink-{}.txt", std::process::id()));
        let sink = OutputSink::open(Some(&path)).unwrap();
        assert!(sink.is_owned());
        assert!(!sink.supports_color());

        sink.write_line("hello").unwrap();
        sink.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        let _ = std::fs::remove_file(&path);
    }
}
