use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use caseclip_core::timestamped_variant;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the output directory exists; create it (and intermediates) if
/// missing. A path that exists but is not a directory is rejected.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes case files into the output directory without ever overwriting.
///
/// Content lands in a temp file in the same directory first and is renamed
/// into place after flush; a failure before the rename leaves the directory
/// unchanged. When the target name is already taken, a timestamped variant
/// of the name is used instead.
pub struct CaseFileWriter {
    output_dir: PathBuf,
    auto_create_dir: bool,
}

impl CaseFileWriter {
    pub fn new(output_dir: PathBuf, auto_create_dir: bool) -> Self {
        Self {
            output_dir,
            auto_create_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Durably write `content` under `filename`, or under a
    /// `collision_stamp`ed variant when `filename` is taken.
    pub fn write_new(
        &self,
        filename: &str,
        content: &str,
        collision_stamp: &str,
    ) -> Result<PathBuf, PersistError> {
        if self.auto_create_dir {
            ensure_output_dir(&self.output_dir)?;
        } else if !self.output_dir.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} does not exist and auto-create is disabled",
                self.output_dir.display()
            )));
        }

        let target = if self.output_dir.join(filename).exists() {
            self.output_dir
                .join(timestamped_variant(filename, collision_stamp))
        } else {
            self.output_dir.join(filename)
        };

        let mut tmp = NamedTempFile::new_in(&self.output_dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Single-process assumption: the name chosen above is still free, so
        // a clobber here would be a bug rather than a race to tolerate.
        tmp.persist_noclobber(&target)
            .map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
