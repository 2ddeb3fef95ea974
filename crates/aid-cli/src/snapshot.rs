// Rust guideline compliant 2026-10-16

//! JSONL snapshot files the commands read and write.
//!
//! Each file holds one record per line. Commands treat a file as a snapshot
//! of one storage table: they load it, act on the rows, and with `--write`
//! replace it in a single rename.

use aid_app::AppError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Loads every record in `path`.
///
/// A missing file is an empty table. Lines that do not parse as `T` are
/// skipped with a warning.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be opened.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    read_records(path, false)
}

/// Loads every record in `path` ahead of replacing the file.
///
/// Unlike [`load_records`], a malformed line is an error: saving the parsed
/// rows back would drop it.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any line does not parse.
pub fn load_records_for_rewrite<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    read_records(path, true)
}

fn read_records<T: DeserializeOwned>(path: &Path, strict: bool) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(&line) {
            Ok(record) => records.push(record),
            Err(err) if strict => {
                return Err(AppError::InvalidInput(format!(
                    "{} line {} is malformed ({err}); refusing to rewrite the file",
                    path.display(),
                    index + 1
                ))
                .into());
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    line = index + 1,
                    error = %err,
                    "skipping malformed record"
                );
            }
        }
    }
    Ok(records)
}

/// Replaces the contents of `path` with `records`.
///
/// Writes to a sibling temp file first and renames it into place.
///
/// # Errors
///
/// Returns an error if a record cannot be serialized or the file cannot be
/// written.
pub fn save_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let temp_path = path.with_extension("jsonl.tmp");
    {
        let file = File::create(&temp_path)
            .with_context(|| format!("Failed to create {}", temp_path.display()))?;
        let mut writer = BufWriter::new(file);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
