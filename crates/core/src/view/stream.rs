use std::{
    fs::File,
    io::{self, LineWriter, Stdout, Write},
    path::Path,
    sync::Weak,
};

use parking_lot::Mutex;
use tracing::warn;

use super::{DrawNumberObserver, DrawNumberView};
use crate::model::DrawResult;

/// Writes one plain line per event to a sink. Never produces guesses.
pub struct StreamView<W: Write + Send> {
    out: Mutex<W>,
}

impl StreamView<Stdout> {
    /// Write to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl StreamView<LineWriter<File>> {
    /// Log to a file, truncating any previous content.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(LineWriter::new(file)))
    }
}

impl<W: Write + Send> StreamView<W> {
    /// Write to an arbitrary sink.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock();
        if let Err(err) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            warn!("Stream view write failed: {err}");
        }
    }
}

impl<W: Write + Send> DrawNumberView for StreamView<W> {
    // Passive: nothing is ever reported back.
    fn set_observer(&self, _observer: Weak<dyn DrawNumberObserver>) {}

    fn start(&self) {}

    fn result(&self, result: DrawResult) {
        self.write_line(&format!("Result: {result}"));
    }

    fn number_incorrect(&self) {
        self.write_line("Incorrect number: out of the allowed range");
    }

    fn display_error(&self, message: &str) {
        self.write_line(&format!("Error: {message}"));
    }
}
