use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::warn;

/// Human-readable run log. Every line goes to stderr and to the results
/// file; the file is truncated on creation and flushed on `finish` or drop.
pub struct Transcript {
    sinks: Vec<Box<dyn Write>>,
}

impl Transcript {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_sinks(vec![
            Box::new(io::stderr()),
            Box::new(BufWriter::new(file)),
        ]))
    }

    pub fn with_sinks(sinks: Vec<Box<dyn Write>>) -> Self {
        Self { sinks }
    }

    /// Write failures are reported through `tracing` and otherwise ignored so
    /// that a full disk cannot abort a run half way.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        for sink in &mut self.sinks {
            if let Err(e) = writeln!(sink, "{text}") {
                warn!(error = %e, "Failed to write transcript line");
            }
        }
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    pub fn rule(&mut self) {
        self.line("=".repeat(80));
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}

impl Drop for Transcript {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
