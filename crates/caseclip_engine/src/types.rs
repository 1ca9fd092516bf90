use std::io;
use std::path::PathBuf;

use caseclip_core::TickResultKind;
use thiserror::Error;

use crate::PersistError;

/// One completed content write. Never mutated after creation; its hash is
/// what populates the duplicate-suppression cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecord {
    pub path: PathBuf,
    pub bytes_written: u64,
    pub content_hash: String,
    pub saved_at: String,
}

/// Result of running the save pipeline on one clipboard snippet. Duplicates
/// and non-matching content are defined outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(SaveRecord),
    DuplicateSkipped { content_hash: String },
    NoMatch,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("output directory unavailable: {0}")]
    OutputDir(String),
    #[error("content too large ({actual} bytes, max {max_bytes})")]
    ContentTooLarge { max_bytes: u64, actual: u64 },
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

impl From<PersistError> for SaveError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::OutputDir(reason) => SaveError::OutputDir(reason),
            PersistError::Io(err) => SaveError::Io(err),
        }
    }
}

/// Event delivered to the notifier collaborator. Purely observational; the
/// engine consumes no return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    Saved { path: PathBuf },
    DuplicateSkipped { content_hash: String },
    NoMatch,
    Error { reason: String },
}

impl MonitorEvent {
    pub fn from_save_result(result: &Result<SaveOutcome, SaveError>) -> Self {
        match result {
            Ok(SaveOutcome::Saved(record)) => MonitorEvent::Saved {
                path: record.path.clone(),
            },
            Ok(SaveOutcome::DuplicateSkipped { content_hash }) => MonitorEvent::DuplicateSkipped {
                content_hash: content_hash.clone(),
            },
            Ok(SaveOutcome::NoMatch) => MonitorEvent::NoMatch,
            Err(err) => MonitorEvent::Error {
                reason: err.to_string(),
            },
        }
    }

    /// Projection used for the status tallies in the core state machine.
    pub fn result_kind(result: &Result<SaveOutcome, SaveError>) -> TickResultKind {
        match result {
            Ok(SaveOutcome::Saved(_)) => TickResultKind::Saved,
            Ok(SaveOutcome::DuplicateSkipped { .. }) => TickResultKind::DuplicateSkipped,
            Ok(SaveOutcome::NoMatch) => TickResultKind::NoMatch,
            Err(_) => TickResultKind::Failed,
        }
    }
}
