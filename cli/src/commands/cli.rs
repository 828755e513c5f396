use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use errscan_core::api::{ColorMode, OutputFormat, ScanMode};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Block,
    Line,
}

impl From<ModeArg> for ScanMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Block => ScanMode::Block,
            ModeArg::Line => ScanMode::Line,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(c: ColorArg) -> Self {
        match c {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "errscan", version, about = "Report ERROR blocks from correlator logs")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the configured highlight colouring.
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorArg>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScanArgs {
    /// Log files to scan; each gets its own extractor.
    #[arg(required = true)]
    pub logs: Vec<PathBuf>,

    /// - block: ERROR line plus continuation lines, closed by the next ERROR line
    /// - line: every ERROR line on its own
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Emit the block still open at end of input instead of dropping it.
    #[arg(long, default_value_t = false)]
    pub emit_trailing_block: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DiffArgs {
    #[arg(long)]
    pub actual: String,

    #[arg(long)]
    pub expected: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan log files and report every closed ERROR block.
    Scan(ScanArgs),
    /// Show the divergence index and highlight for two strings.
    Diff(DiffArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scan_with_overrides() {
        let args = Args::parse_from([
            "errscan",
            "scan",
            "a.log",
            "b.log",
            "--mode",
            "line",
            "--format",
            "json",
            "--emit-trailing-block",
            "--color",
            "never",
        ]);
        assert_eq!(args.color, Some(ColorArg::Never));
        match args.command {
            Commands::Scan(s) => {
                assert_eq!(s.logs, vec![PathBuf::from("a.log"), PathBuf::from("b.log")]);
                assert_eq!(s.mode, Some(ModeArg::Line));
                assert_eq!(s.format, Some(FormatArg::Json));
                assert!(s.emit_trailing_block);
            }
            Commands::Diff(_) => panic!("expected scan"),
        }
    }

    #[test]
    fn scan_requires_a_log() {
        assert!(Args::try_parse_from(["errscan", "scan"]).is_err());
    }

    #[test]
    fn parses_diff() {
        let args = Args::parse_from(["errscan", "diff", "--actual", "abc", "--expected", "abd"]);
        match args.command {
            Commands::Diff(d) => {
                assert_eq!(d.actual, "abc");
                assert_eq!(d.expected, "abd");
            }
            Commands::Scan(_) => panic!("expected diff"),
        }
    }
}
