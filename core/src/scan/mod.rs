//! Scan driver: log files in, emissions and reports out.

mod cmd;
mod file;
mod render;
mod report;

pub use cmd::{diff_cmd, format_diff, scan_cmd, scan_logs, DiffArgs, ScanArgs, ScanSummary};
pub use file::{scan_file, scan_str, ScanOptions, ScanRun};
pub use render::{render_highlight, ACTUAL_LABEL, EXPECTED_LABEL, LABEL_WIDTH};
pub use report::{build_report, format_text};
