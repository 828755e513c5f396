use clap::Parser;
mod commands;
use commands::cli;
use errscan_core::api::{
    get_errscan_data_dir, AppConfig, ColorMode, LoggingConfig, ScanConfig, ScanOptions,
};
use errscan_core::error;
use errscan_core::scan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, error::CliError> {
    let args = cli::Args::parse();
    let cfg = errscan_core::config::load_default()
        .map_err(|e| error::CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging)?;

    dispatch(args, cfg).await
}

fn exit_code_for_error(e: &error::CliError) -> i32 {
    // 0: no emissions
    // 1: at least one emission (returned as a normal exit code, not as an error)
    // 11: config error
    // 20: log read / IO error
    // 50: internal/uncategorized
    match e {
        error::CliError::Config(_) => 11,
        error::CliError::Scan(se) => match se {
            error::ScanError::Io { .. } => 20,
            error::ScanError::Join { .. } => 50,
        },
        error::CliError::Io(_) => 20,
        error::CliError::Command(_) => 20,
    }
}

async fn dispatch(args: cli::Args, cfg: AppConfig) -> Result<i32, error::CliError> {
    let color: ColorMode = args.color.map(Into::into).unwrap_or(cfg.scan.color);

    match args.command {
        cli::Commands::Scan(scan_args) => {
            let core_args = scan::ScanArgs {
                options: scan_options(&scan_args, &cfg.scan),
                logs: scan_args.logs,
                format: scan_args.format.map(Into::into).unwrap_or(cfg.scan.format),
                color,
            };
            let summary = scan::scan_cmd(core_args).await?;
            tracing::info!(
                files = summary.files,
                emissions = summary.emissions,
                "scan finished"
            );
            Ok(if summary.failed() { 1 } else { 0 })
        }
        cli::Commands::Diff(diff_args) => {
            scan::diff_cmd(scan::DiffArgs {
                actual: diff_args.actual,
                expected: diff_args.expected,
                color,
            })?;
            Ok(0)
        }
    }
}

/// Command-line flags win over `[scan]`; `--emit-trailing-block` can only switch flushing on.
fn scan_options(scan_args: &cli::ScanArgs, scan_cfg: &ScanConfig) -> ScanOptions {
    let mut options = ScanOptions::from(scan_cfg);
    if let Some(mode) = scan_args.mode {
        options.mode = mode.into();
    }
    options.emit_trailing_block |= scan_args.emit_trailing_block;
    options
}

/// `[logging] directory` when set, otherwise `logs/` under the errscan data dir.
fn log_directory(logging: &LoggingConfig) -> std::path::PathBuf {
    if let Some(d) = logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return std::path::PathBuf::from(d);
    }
    match get_errscan_data_dir() {
        Ok(home) => home.join("logs"),
        Err(_) => std::env::temp_dir().join("errscan"),
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), error::CliError> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(&logging.level).map_err(|e| {
            error::CliError::Config(format!("invalid logging.level {:?}: {e}", logging.level))
        })?,
    };

    if !logging.console && !logging.file {
        return Err(error::CliError::Config(
            "logging is enabled but both console and file output are off".to_string(),
        ));
    }

    let file_writer = if logging.file {
        let dir = log_directory(logging);
        std::fs::create_dir_all(&dir)?;
        // Scans of one day share a file; each run is told apart by its timestamps.
        let appender = tracing_appender::rolling::daily(dir, "errscan.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        Some(non_blocking)
    } else {
        None
    };

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = file_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
