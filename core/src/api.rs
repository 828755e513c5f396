//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `errscan_core::api` instead of reaching into internal modules.

pub use crate::config::{
    get_errscan_data_dir, load_default, AppConfig, ColorMode, LoggingConfig, OutputFormat,
    ScanConfig,
};
pub use crate::error::{CliError, ScanError};
pub use crate::extract::{
    divergence_index, extract_mismatch, Emission, ErrorBlockExtractor, MismatchPair, ScanMode,
};
pub use crate::scan::{
    build_report, diff_cmd, format_text, render_highlight, scan_cmd, scan_file, scan_str,
    DiffArgs, ScanArgs, ScanOptions, ScanRun, ScanSummary,
};
