//! Snapshot files holding one fetched collection each.
//!
//! A snapshot is a pretty-printed JSON array written to
//! `<output_dir>/<file_name>`. Existing files are truncated, never appended
//! to, and the output directory is created on first use.

use std::env;
use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::info;

use crate::github::error::IngestError;
use crate::github::models::Record;

/// Writes record collections into a single output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotWriter {
    output_dir: Utf8PathBuf,
}

impl SnapshotWriter {
    /// Creates a writer targeting `output_dir`. Nothing touches the
    /// filesystem until the first write.
    #[must_use]
    pub fn new(output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory snapshots are written into.
    #[must_use]
    pub fn output_dir(&self) -> &Utf8Path {
        &self.output_dir
    }

    /// Path a snapshot named `file_name` is written to.
    #[must_use]
    pub fn path_for(&self, file_name: &str) -> Utf8PathBuf {
        self.output_dir.join(file_name)
    }

    /// Serialises `records` to `file_name` and returns how many top-level
    /// records were written.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Io`] when the file name is not a plain file
    /// name, the directory or file cannot be created, or writing fails.
    pub fn write(&self, file_name: &str, records: &[Record]) -> Result<usize, IngestError> {
        validate_file_name(file_name)?;
        let path = self.path_for(file_name);

        let dir = open_output_dir(&self.output_dir)?;
        let file = dir.create(file_name).map_err(|error| IngestError::Io {
            message: format!("failed to create snapshot '{path}': {error}"),
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records).map_err(|error| IngestError::Io {
            message: format!("failed to serialise snapshot '{path}': {error}"),
        })?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|error| IngestError::Io {
                message: format!("failed to write snapshot '{path}': {error}"),
            })?;

        info!(path = %path, count = records.len(), "wrote snapshot");
        Ok(records.len())
    }
}

fn validate_file_name(file_name: &str) -> Result<(), IngestError> {
    let path = Utf8Path::new(file_name);
    if file_name.is_empty() || path.file_name() != Some(file_name) {
        return Err(IngestError::Io {
            message: format!("snapshot name must be a plain file name: '{file_name}'"),
        });
    }
    Ok(())
}

/// Opens `path` as a capability handle, creating it and its parents first.
fn open_output_dir(path: &Utf8Path) -> Result<Dir, IngestError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        current_dir()?.join(path)
    };

    let root = Dir::open_ambient_dir("/", ambient_authority()).map_err(|error| IngestError::Io {
        message: format!("failed to open root directory for snapshots: {error}"),
    })?;
    let relative = absolute.strip_prefix("/").map_err(|_| IngestError::Io {
        message: format!("failed to normalise snapshot directory '{absolute}'"),
    })?;

    if relative.as_str().is_empty() {
        return Ok(root);
    }

    root.create_dir_all(relative)
        .map_err(|error| IngestError::Io {
            message: format!("failed to create snapshot directory '{path}': {error}"),
        })?;
    root.open_dir(relative).map_err(|error| IngestError::Io {
        message: format!("failed to open snapshot directory '{path}': {error}"),
    })
}

fn current_dir() -> Result<Utf8PathBuf, IngestError> {
    let cwd = env::current_dir().map_err(|error| IngestError::Io {
        message: format!("failed to read current directory: {error}"),
    })?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|raw| IngestError::Io {
        message: format!("current directory is not UTF-8: {}", raw.display()),
    })
}
