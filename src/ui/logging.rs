//! Logging utilities
//!
//! The terminal belongs to the UI, so log records go to a size-rotated file
//! in the user's cache directory instead.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use env_logger::{Builder, Target, fmt::TimestampPrecision};
use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use log::LevelFilter;

/// File name of the log inside the cache directory.
const LOG_FILE_NAME: &str = "swapi_browser.log";

/// Rotated files kept next to the live one.
const LOG_FILE_COUNT: usize = 3;

/// Size at which the live log file is rotated.
const LOG_FILE_BYTES: usize = 1024 * 1024;

/// Locates the log file.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn log_file_path() -> Result<PathBuf>
{
    let base_dirs = BaseDirs::new().context("Failed to determine the cache directory")?;

    Ok(base_dirs.cache_dir().join(LOG_FILE_NAME))
}

/// Initializes the logging system for the application.
///
/// Everything at info and above is recorded, plus debug records from this
/// crate, with millisecond timestamps.
///
/// # Arguments
///
/// * `log_path` - Where the live log file is written
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a logger is
/// already installed.
pub fn init_logging(log_path: &Path) -> Result<()>
{
    let writer = rotating_writer(log_path)?;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("swapi_browser", LevelFilter::Debug)
        .format_timestamp(Some(TimestampPrecision::Millis))
        .target(Target::Pipe(Box::new(writer)))
        .try_init()
        .context("Failed to initialize logging")
}

/// Removes the log file and its rotated copies.
///
/// Missing files are not an error.
///
/// # Errors
///
/// Returns an error if an existing file cannot be removed.
pub fn clear_log_file(log_path: &Path) -> Result<()>
{
    let rotated = (1..=LOG_FILE_COUNT).map(|index| {
        let mut name = log_path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    });

    for path in std::iter::once(log_path.to_path_buf()).chain(rotated)
    {
        match fs::remove_file(&path)
        {
            Err(err) if err.kind() != ErrorKind::NotFound =>
            {
                return Err(err).context(format!("Failed to remove {}", path.display()));
            }
            _ =>
            {}
        }
    }

    Ok(())
}

/// Opens the live log file, rotating by size.
fn rotating_writer(log_path: &Path) -> Result<FileRotate<AppendCount>>
{
    if let Some(parent) = log_path.parent()
    {
        fs::create_dir_all(parent).context("Failed to create log directory")?;
    }

    Ok(FileRotate::new(
        log_path,
        AppendCount::new(LOG_FILE_COUNT),
        ContentLimit::Bytes(LOG_FILE_BYTES),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}
