//! Append-only JSON-lines log files.
//!
//! Action logs and observation records share one format: one JSON document per
//! line, in the order written.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::repository::{RepositoryError, Result};

/// Generic file-backed log of `T` values, one JSON document per line.
pub struct JsonLinesLog<T> {
    path: PathBuf,
    writer: BufWriter<File>,
    entries: u64,
    _phantom: PhantomData<T>,
}

impl<T> JsonLinesLog<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates (or truncates) `base_dir/filename`.
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir).map_err(|e| RepositoryError::io(base_dir, e))?;

        let path = base_dir.join(filename.as_ref());
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| RepositoryError::io(&path, e))?;

        tracing::debug!(target: "runtime::session", "Created log: {}", path.display());

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            entries: 0,
            _phantom: PhantomData,
        })
    }

    /// Appends one entry and returns its line index.
    pub fn append(&mut self, entry: &T) -> Result<u64> {
        serde_json::to_writer(&mut self.writer, entry)?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| RepositoryError::io(&self.path, e))?;
        let index = self.entries;
        self.entries += 1;
        Ok(index)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| RepositoryError::io(&self.path, e))
    }

    pub fn len(&self) -> u64 {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> Drop for JsonLinesLog<T> {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(target: "runtime::session", "Failed to flush {}: {}", self.path.display(), e);
        }
    }
}

/// Reads every entry of a JSON-lines file. Blank lines are skipped.
pub fn read_json_lines<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RepositoryError::io(path, e))?;

    let mut entries = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| RepositoryError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str(&line).map_err(|source| RepositoryError::Json {
            path: path.display().to_string(),
            line: index + 1,
            source,
        })?;
        entries.push(entry);
    }
    Ok(entries)
}
