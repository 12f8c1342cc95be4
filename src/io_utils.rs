//! Filesystem helpers shared by the generate and transfer commands.
//!
//! - **Path checks**: output directories and upload sources are validated up
//!   front so a bad path fails before any network traffic.
//! - **Writer construction**: CSV output goes through a buffered file writer
//!   that truncates existing files.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use csv::QuoteStyle;

use crate::error::{ChartError, Result};

/// Confirms `path` names an existing directory.
pub fn verify_directory(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path)
        .map_err(|err| ChartError::file_system(path, format!("Could not read path info: {err}")))?;
    if !metadata.is_dir() {
        return Err(ChartError::file_system(
            path,
            "The provided path is not a directory",
        ));
    }
    Ok(())
}

/// Confirms `path` exists, returning its cleaned form.
pub fn verify_source_file(path: &Path) -> Result<PathBuf> {
    let cleaned = clean_path(path);
    if !cleaned.exists() {
        return Err(ChartError::file_system(
            &cleaned,
            format!("The file '{}' does not exist.", cleaned.display()),
        ));
    }
    Ok(cleaned)
}

/// Drops `.` components and redundant separators without touching the disk.
pub fn clean_path(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|component| !matches!(component, std::path::Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

pub fn open_csv_writer(path: &Path) -> Result<csv::Writer<Box<dyn Write>>> {
    let file = File::create(path)
        .map_err(|err| ChartError::file_system(path, format!("Could not create csv file: {err}")))?;
    let base: Box<dyn Write> = Box::new(BufWriter::new(file));
    Ok(csv_writer(base))
}

pub fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(b',')
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true);
    builder.from_writer(writer)
}
