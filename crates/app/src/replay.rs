//! Frame sources
//!
//! A recording is one JSON `FrameSnapshot` per line. Blank lines and lines
//! starting with `#` are ignored; lines that fail to parse are logged and
//! skipped.

use attention::FrameSnapshot;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Produces tracker frames in time order
pub trait FrameSource {
    /// Next frame, `None` once the source is exhausted
    fn next_frame(&mut self) -> Option<FrameSnapshot>;
}

/// JSON-lines tracker recording
pub struct ReplaySource<R> {
    reader: R,
    line: String,
    line_no: usize,
    skipped: usize,
}

impl ReplaySource<Box<dyn BufRead + Send>> {
    /// Open a recording file, `-` reads standard input
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let reader: Box<dyn BufRead + Send> = if path == Path::new("-") {
            Box::new(BufReader::new(io::stdin()))
        } else {
            Box::new(BufReader::new(File::open(path)?))
        };
        Ok(Self::from_reader(reader))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Lines dropped as malformed so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> FrameSource for ReplaySource<R> {
    fn next_frame(&mut self) -> Option<FrameSnapshot> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    debug!(lines = self.line_no, skipped = self.skipped, "Recording exhausted");
                    return None;
                }
                Ok(_) => self.line_no += 1,
                Err(e) => {
                    warn!(line = self.line_no + 1, error = %e, "Cannot read recording");
                    return None;
                }
            }

            let text = self.line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            match serde_json::from_str::<FrameSnapshot>(text) {
                Ok(frame) => return Some(frame),
                Err(e) => {
                    self.skipped += 1;
                    warn!(line = self.line_no, error = %e, "Skipping malformed frame");
                }
            }
        }
    }
}
