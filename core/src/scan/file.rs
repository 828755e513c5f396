use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::extract::grammar::universal_lines;
use crate::extract::{Emission, ErrorBlockExtractor, ScanMode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub mode: ScanMode,
    pub emit_trailing_block: bool,
}

impl ScanOptions {
    pub fn extractor(&self) -> ErrorBlockExtractor {
        ErrorBlockExtractor::new(self.mode).with_trailing_block(self.emit_trailing_block)
    }
}

impl From<&ScanConfig> for ScanOptions {
    fn from(cfg: &ScanConfig) -> Self {
        Self {
            mode: cfg.mode,
            emit_trailing_block: cfg.emit_trailing_block,
        }
    }
}

/// Emissions of one log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRun {
    pub path: String,
    pub mode: ScanMode,
    pub lines: usize,
    pub emissions: Vec<Emission>,
}

impl ScanRun {
    pub fn with_mismatch(&self) -> usize {
        self.emissions
            .iter()
            .filter(|e| e.mismatch.is_some())
            .count()
    }
}

/// Scan a log file in one forward pass. Any read error aborts the whole pass.
pub fn scan_file(path: &Path, opts: &ScanOptions) -> Result<ScanRun, ScanError> {
    let file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut extractor = opts.extractor();
    let mut emissions = Vec::new();
    let mut buf = String::new();

    loop {
        buf.clear();
        let n = reader
            .read_line(&mut buf)
            .map_err(|e| ScanError::io(path, e))?;
        if n == 0 {
            break;
        }
        // read_line only stops at `\n`; a lone `\r` inside the chunk still ends a line.
        for line in universal_lines(&buf) {
            emissions.extend(extractor.feed_line(&line));
        }
    }

    let lines = extractor.lines_read();
    emissions.extend(extractor.finish());

    tracing::info!(
        path = %path.display(),
        lines,
        emissions = emissions.len(),
        "log scanned"
    );

    Ok(ScanRun {
        path: path.to_string_lossy().to_string(),
        mode: opts.mode,
        lines,
        emissions,
    })
}

/// Same pass as [`scan_file`] over text already in memory.
pub fn scan_str(name: &str, input: &str, opts: &ScanOptions) -> ScanRun {
    let mut extractor = opts.extractor();
    let mut emissions: Vec<Emission> = universal_lines(input)
        .filter_map(|line| extractor.feed_line(&line))
        .collect();
    let lines = extractor.lines_read();
    emissions.extend(extractor.finish());

    ScanRun {
        path: name.to_string(),
        mode: opts.mode,
        lines,
        emissions,
    }
}
