//! Coordinate acquisition seam
//!
//! The physical position sensor is an external collaborator; the core only
//! depends on the [`CoordinateSource`] contract: a read yields a finite,
//! possibly empty trace within a timeout. An empty trace means "no data /
//! timed out" and is retryable, never an error.

use crate::trace::RawTrace;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Source of drawn coordinate traces.
pub trait CoordinateSource {
    /// Read one trace, waiting at most `timeout`.
    ///
    /// Returns an empty trace when no data arrived in time. Errors are
    /// reserved for the source itself failing (unreadable file, closed
    /// stdin), not for the absence of input.
    fn read_coordinates(&mut self, timeout: Duration) -> crate::Result<RawTrace>;
}

/// Replays a fixed sequence of trace files, one per read.
///
/// Used by the one-shot CLI commands (`store`, `check`) where the trace to
/// process is named up front, and in tests. Reads past the end of the queue
/// yield empty traces, mirroring a sensor timeout.
pub struct TraceFileSource {
    queue: VecDeque<PathBuf>,
}

impl TraceFileSource {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            queue: paths.into_iter().collect(),
        }
    }

    pub fn single(path: PathBuf) -> Self {
        Self::new([path])
    }
}

impl CoordinateSource for TraceFileSource {
    fn read_coordinates(&mut self, _timeout: Duration) -> crate::Result<RawTrace> {
        match self.queue.pop_front() {
            Some(path) => {
                debug!(path = %path.display(), "Reading trace file");
                RawTrace::load(&path)
            }
            None => Ok(RawTrace::default()),
        }
    }
}

/// Interactively prompts for a trace file path on each read.
///
/// Stand-in for the serial sensor during the interactive game: each "draw"
/// is supplied as a recorded trace file. A blank line is treated as a
/// timed-out read (empty trace) so the caller re-prompts.
pub struct PromptSource<R, W> {
    input: R,
    output: W,
}

impl PromptSource<std::io::BufReader<std::io::Stdin>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self {
            input: std::io::BufReader::new(std::io::stdin()),
            output: std::io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> CoordinateSource for PromptSource<R, W> {
    fn read_coordinates(&mut self, timeout: Duration) -> crate::Result<RawTrace> {
        write!(self.output, "Trace file (blank to retry): ")
            .and_then(|_| self.output.flush())
            .map_err(|e| crate::Error::Sensor(e.to_string()))?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|e| crate::Error::Sensor(e.to_string()))?;

        let path = line.trim();
        if path.is_empty() {
            debug!(timeout_secs = timeout.as_secs(), "No trace supplied");
            return Ok(RawTrace::default());
        }
        RawTrace::load(path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::RawTrace;

    #[test]
    fn test_file_source_replays_in_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let first = dir.path().join("a.json");
        let second = dir.path().join("b.json");
        RawTrace::from_pairs([(0.0, 0.0), (1.0, 1.0)])
            .save(&first)
            .unwrap();
        RawTrace::from_pairs([(5.0, 5.0), (6.0, 6.0), (7.0, 7.0)])
            .save(&second)
            .unwrap();

        let mut source = TraceFileSource::new([first, second]);
        let timeout = Duration::from_secs(5);

        assert_eq!(source.read_coordinates(timeout).unwrap().len(), 2);
        assert_eq!(source.read_coordinates(timeout).unwrap().len(), 3);
        // Exhausted queue reads as a sensor timeout.
        assert!(source.read_coordinates(timeout).unwrap().is_empty());
    }

    #[test]
    fn test_prompt_source_blank_line_is_a_timeout() {
        let input = std::io::Cursor::new("\n");
        let mut output = Vec::new();
        let mut source = PromptSource::new(input, &mut output);

        let trace = source.read_coordinates(Duration::from_secs(1)).unwrap();
        assert!(trace.is_empty());
        assert!(String::from_utf8(output).unwrap().contains("Trace file"));
    }

    #[test]
    fn test_prompt_source_loads_named_trace() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("glyph.json");
        RawTrace::from_pairs([(1.0, 2.0), (3.0, 4.0)]).save(&path).unwrap();

        let input = std::io::Cursor::new(format!("{}\n", path.display()));
        let mut output = Vec::new();
        let mut source = PromptSource::new(input, &mut output);

        let trace = source.read_coordinates(Duration::from_secs(1)).unwrap();
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn test_file_source_missing_file_is_an_error() {
        let mut source = TraceFileSource::single("/nonexistent/trace.json".into());
        assert!(source
            .read_coordinates(Duration::from_secs(1))
            .is_err());
    }
}
