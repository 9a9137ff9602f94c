//! Tracing setup: append-only log file under the XDG state dir, with stderr
//! as the fallback when that file cannot be opened.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,ccdl=debug,ccdl_core=debug";
/// Filter used with `--verbose`; also traces every normalization rule hit.
pub const VERBOSE_FILTER: &str = "debug,ccdl=trace,ccdl_core=trace";

/// Log file shared by every event; `&File` is a writer, so nothing is cloned.
struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = &'a File;

    fn make_writer(&'a self) -> Self::Writer {
        &self.0
    }
}

pub fn filter_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose)))
}

/// `~/.local/state/ccdl/ccdl.log`; the directory is created if missing.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ccdl")?;
    Ok(xdg_dirs.place_state_file("ccdl.log")?)
}

/// Installs the global subscriber writing to [`log_path`] and returns the path.
///
/// Errors leave no subscriber installed, so the caller can still fall back
/// to [`init_logging_stderr`].
pub fn init_logging(verbose: bool) -> Result<PathBuf> {
    let path = log_path().context("log directory")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(LogFile(file))
        .with_ansi(false)
        .init();

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(path)
}

pub fn init_logging_stderr(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
