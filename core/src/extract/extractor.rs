use super::grammar::{is_error_line, normalize_terminator, strip_fields};
use super::mismatch::extract_mismatch;
use super::model::{Emission, ScanMode};

/// Stateful, single-pass grouper of ERROR lines into emissions.
///
/// Feed lines in file order, terminators included. A block is open while its accumulated
/// text is non-empty; it is closed by the next ERROR line. Whatever is still open when input
/// ends is dropped unless [`ErrorBlockExtractor::with_trailing_block`] asks for it.
///
/// Each log file needs its own instance.
#[derive(Debug)]
pub struct ErrorBlockExtractor {
    mode: ScanMode,
    emit_trailing_block: bool,
    block: String,
    block_line: usize,
    line_no: usize,
    discarded: usize,
}

impl ErrorBlockExtractor {
    pub fn new(mode: ScanMode) -> Self {
        Self {
            mode,
            emit_trailing_block: false,
            block: String::new(),
            block_line: 0,
            line_no: 0,
            discarded: 0,
        }
    }

    pub fn with_trailing_block(mut self, emit: bool) -> Self {
        self.emit_trailing_block = emit;
        self
    }

    pub fn is_block_open(&self) -> bool {
        !self.block.is_empty()
    }

    /// Lines read so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    /// Non-ERROR lines read while no block was open.
    pub fn lines_discarded(&self) -> usize {
        self.discarded
    }

    pub fn feed_line(&mut self, line: &str) -> Option<Emission> {
        self.line_no += 1;
        let line = normalize_terminator(line);
        match self.mode {
            ScanMode::Block => self.feed_block(&line),
            ScanMode::Line => self.feed_single(&line),
        }
    }

    fn feed_block(&mut self, line: &str) -> Option<Emission> {
        if !is_error_line(line) {
            if self.is_block_open() {
                self.block.push_str(line);
            } else {
                self.discarded += 1;
            }
            return None;
        }

        let closed = self.is_block_open().then(|| self.close_block());

        self.block.push_str(strip_fields(line));
        self.block_line = self.line_no;
        if self.is_block_open() {
            tracing::debug!(line = self.line_no, "error block opened");
        } else {
            tracing::debug!(line = self.line_no, "ERROR line without payload ignored");
        }

        closed
    }

    fn feed_single(&mut self, line: &str) -> Option<Emission> {
        if !is_error_line(line) {
            self.discarded += 1;
            return None;
        }
        Some(Emission {
            line: self.line_no,
            message: strip_fields(line).to_string(),
            mismatch: None,
            divergence: None,
        })
    }

    fn close_block(&mut self) -> Emission {
        let message = std::mem::take(&mut self.block);
        let mismatch = extract_mismatch(&message);
        let divergence = mismatch.as_ref().map(|m| m.divergence());
        if mismatch.is_none() {
            tracing::debug!(
                line = self.block_line,
                "no actual/expected pair in block, emitting message only"
            );
        }
        tracing::debug!(line = self.block_line, "error block closed");
        Emission {
            line: self.block_line,
            message,
            mismatch,
            divergence,
        }
    }

    /// End of input. Returns the open block only when trailing emission is enabled.
    pub fn finish(mut self) -> Option<Emission> {
        tracing::trace!(
            lines = self.line_no,
            discarded = self.discarded,
            "extraction pass finished"
        );
        if !self.is_block_open() {
            return None;
        }
        if self.emit_trailing_block {
            Some(self.close_block())
        } else {
            tracing::debug!(
                line = self.block_line,
                "trailing error block left open at end of input, dropped"
            );
            None
        }
    }

    /// Run a complete pass over `lines` and collect every emission.
    pub fn extract_all<'a, I>(mut self, lines: I) -> Vec<Emission>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut out: Vec<Emission> = lines
            .into_iter()
            .filter_map(|line| self.feed_line(line))
            .collect();
        out.extend(self.finish());
        out
    }
}
