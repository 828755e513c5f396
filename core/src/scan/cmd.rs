use std::io::Write;
use std::path::PathBuf;

use crate::config::{ColorMode, OutputFormat};
use crate::error::{CliError, ScanError};
use crate::extract::{divergence_index, MismatchPair};

use super::file::{scan_file, ScanOptions, ScanRun};
use super::render::render_highlight;
use super::report;

#[derive(Debug, Clone)]
pub struct ScanArgs {
    pub logs: Vec<PathBuf>,
    pub options: ScanOptions,
    pub format: OutputFormat,
    pub color: ColorMode,
}

#[derive(Debug, Clone)]
pub struct DiffArgs {
    pub actual: String,
    pub expected: String,
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files: usize,
    pub emissions: usize,
}

impl ScanSummary {
    pub fn failed(&self) -> bool {
        self.emissions > 0
    }
}

/// Scan every log on the blocking pool, one extractor per file, in argument order.
pub async fn scan_logs(
    logs: &[PathBuf],
    options: ScanOptions,
) -> Result<Vec<ScanRun>, ScanError> {
    let handles: Vec<_> = logs
        .iter()
        .cloned()
        .map(|path| {
            let handle = tokio::task::spawn_blocking({
                let path = path.clone();
                move || scan_file(&path, &options)
            });
            (path, handle)
        })
        .collect();

    let mut runs = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let run = handle.await.map_err(|e| ScanError::Join {
            path,
            reason: e.to_string(),
        })??;
        runs.push(run);
    }
    Ok(runs)
}

pub async fn scan_cmd(args: ScanArgs) -> Result<ScanSummary, CliError> {
    if args.logs.is_empty() {
        return Err(CliError::Command("no log files given".to_string()));
    }

    let runs = scan_logs(&args.logs, args.options).await?;

    let mut out = std::io::stdout().lock();
    match args.format {
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(&report::build_report(&runs))
                .map_err(|e| CliError::Command(e.to_string()))?;
            writeln!(out, "{s}")?;
        }
        OutputFormat::Text => {
            write!(out, "{}", report::format_text(&runs, args.color.enabled()))?;
        }
    }
    out.flush()?;

    Ok(ScanSummary {
        files: runs.len(),
        emissions: runs.iter().map(|r| r.emissions.len()).sum(),
    })
}

pub fn format_diff(args: &DiffArgs, color: bool) -> String {
    let pair = MismatchPair {
        actual: args.actual.clone(),
        expected: args.expected.clone(),
    };
    let d = divergence_index(&pair.actual, &pair.expected);
    format!("divergence: {d}\n{}\n", render_highlight(&pair, d, color))
}

pub fn diff_cmd(args: DiffArgs) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    write!(out, "{}", format_diff(&args, args.color.enabled()))?;
    out.flush()?;
    Ok(())
}
