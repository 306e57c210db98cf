//! Task repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Load and save the whole task collection as one JSON document.
//! - Surface unreadable, malformed or invalid files as typed errors.
//!
//! # Invariants
//! - A missing file is an empty store, not an error (first run).
//! - `load` rejects the whole file on any invalid record or duplicated id;
//!   records are never silently skipped, so corruption stays visible.
//! - `save` writes a sibling temporary file and renames it over the target,
//!   so a crash mid-save never exposes a truncated document.
//!
//! Concurrent access to the same file by multiple processes or threads is
//! unsupported and may corrupt state; the store assumes one process, one
//! writer.

use crate::model::task::{Task, TaskId, TaskValidationError};
use log::{debug, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default store location, relative to the application working directory.
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

pub type PersistResult<T> = Result<T, PersistError>;

/// Persistence error for file IO, decoding and stored-state validation.
#[derive(Debug)]
pub enum PersistError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    InvalidRecord {
        index: usize,
        source: TaskValidationError,
    },
    DuplicateId { id: TaskId },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot access task file `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "bad task document `{}`: {source}", path.display())
            }
            Self::InvalidRecord { index, source } => {
                write!(f, "invalid task record at index {index}: {source}")
            }
            Self::DuplicateId { id } => {
                write!(f, "task id {id} appears more than once in the file")
            }
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::DuplicateId { .. } => None,
        }
    }
}

/// Repository interface the store persists through.
///
/// The store is generic over this trait; tests substitute failing
/// implementations to exercise the write-through rollback contract.
pub trait TaskRepository {
    fn load(&self) -> PersistResult<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> PersistResult<()>;
}

/// Whole-file JSON repository.
///
/// The document is a single ordered array of task records with fields `id`,
/// `title`, `deadline` (`DD-MM-YYYY` string), `estimated_minutes`, `notes`
/// and `completed`.
#[derive(Debug)]
pub struct JsonTaskRepository {
    path: PathBuf,
}

impl JsonTaskRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskRepository for JsonTaskRepository {
    fn load(&self) -> PersistResult<Vec<Task>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "event=tasks_load module=repo status=first_run path={}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        let tasks: Vec<Task> = serde_json::from_str(&text).map_err(|err| PersistError::Json {
            path: self.path.clone(),
            source: err,
        })?;

        let mut seen_ids = HashSet::new();
        for (index, task) in tasks.iter().enumerate() {
            task.validate()
                .map_err(|err| PersistError::InvalidRecord { index, source: err })?;
            if !seen_ids.insert(task.id) {
                return Err(PersistError::DuplicateId { id: task.id });
            }
        }

        info!(
            "event=tasks_load module=repo status=ok path={} count={}",
            self.path.display(),
            tasks.len()
        );
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> PersistResult<()> {
        let rendered =
            serde_json::to_string_pretty(tasks).map_err(|err| PersistError::Json {
                path: self.path.clone(),
                source: err,
            })?;

        // Write-then-rename keeps the previous document intact if this
        // process dies mid-write.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, rendered).map_err(|err| PersistError::Io {
            path: tmp_path.clone(),
            source: err,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|err| PersistError::Io {
            path: self.path.clone(),
            source: err,
        })?;

        debug!(
            "event=tasks_save module=repo status=ok path={} count={}",
            self.path.display(),
            tasks.len()
        );
        Ok(())
    }
}
