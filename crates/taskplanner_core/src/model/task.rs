//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record owned by the store.
//! - Validate drafts and partial updates before any record exists.
//!
//! # Invariants
//! - `id` is stable, immutable and never reused for another task.
//! - `title` is non-empty after trimming.
//! - `deadline` is a real calendar date.
//! - `estimated_minutes` is a non-negative integer.

use crate::date::{self, DateError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a task within one store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = u64;

/// Validation error for task construction and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Deadline text is not a valid `DD-MM-YYYY` calendar date.
    InvalidDeadline(DateError),
    /// Estimate is negative or does not fit the stored integer width.
    EstimateOutOfRange { minutes: i64 },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::InvalidDeadline(err) => write!(f, "invalid deadline: {err}"),
            Self::EstimateOutOfRange { minutes } => {
                write!(
                    f,
                    "estimated minutes must be a non-negative integer, got {minutes}"
                )
            }
        }
    }
}

impl Error for TaskValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDeadline(err) => Some(err),
            Self::EmptyTitle | Self::EstimateOutOfRange { .. } => None,
        }
    }
}

impl From<DateError> for TaskValidationError {
    fn from(value: DateError) -> Self {
        Self::InvalidDeadline(value)
    }
}

/// Canonical task record.
///
/// Instances exist only after full validation; the store is the sole owner
/// of live records and hands out clones to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned stable ID; identity is defined by this field alone.
    pub id: TaskId,
    /// Non-empty, stored trimmed.
    pub title: String,
    /// Serialized as a `DD-MM-YYYY` string to match the shell-facing format.
    #[serde(with = "crate::date::as_text")]
    pub deadline: NaiveDate,
    /// Whole minutes of estimated effort.
    pub estimated_minutes: u32,
    /// Free text, may be empty.
    pub notes: String,
    /// Completion flag, defaults to `false` in fresh drafts.
    pub completed: bool,
}

/// Shell-facing input for creating a task.
///
/// Carries the deadline as raw text and the estimate as a signed integer so
/// invalid input is representable and rejected with a typed error instead of
/// failing at the type boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub deadline: String,
    pub estimated_minutes: i64,
    pub notes: String,
    pub completed: bool,
}

impl TaskDraft {
    /// Creates a draft with empty notes and `completed = false`.
    pub fn new(
        title: impl Into<String>,
        deadline: impl Into<String>,
        estimated_minutes: i64,
    ) -> Self {
        Self {
            title: title.into(),
            deadline: deadline.into(),
            estimated_minutes,
            notes: String::new(),
            completed: false,
        }
    }
}

/// Sparse field-changes record for partial updates.
///
/// Only fields set to `Some` are re-validated and applied; everything else
/// keeps its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub deadline: Option<String>,
    pub estimated_minutes: Option<i64>,
    pub notes: Option<String>,
    pub completed: Option<bool>,
}

impl Task {
    /// Builds a validated task from a draft.
    ///
    /// Validation order: title, deadline, estimate. All checks run before
    /// the record is constructed; failure never produces partial state.
    pub fn new(id: TaskId, draft: &TaskDraft) -> Result<Self, TaskValidationError> {
        let title = validate_title(&draft.title)?;
        let deadline = date::parse_date(&draft.deadline)?;
        let estimated_minutes = validate_estimate(draft.estimated_minutes)?;

        Ok(Self {
            id,
            title,
            deadline,
            estimated_minutes,
            notes: draft.notes.clone(),
            completed: draft.completed,
        })
    }

    /// Applies a sparse patch, re-validating only the changed fields.
    ///
    /// Returns a new record; `self` is untouched, so a failed update leaves
    /// the stored task exactly as it was.
    pub fn apply(&self, patch: &TaskPatch) -> Result<Self, TaskValidationError> {
        let mut next = self.clone();

        if let Some(title) = &patch.title {
            next.title = validate_title(title)?;
        }
        if let Some(deadline) = &patch.deadline {
            next.deadline = date::parse_date(deadline)?;
        }
        if let Some(minutes) = patch.estimated_minutes {
            next.estimated_minutes = validate_estimate(minutes)?;
        }
        if let Some(notes) = &patch.notes {
            next.notes = notes.clone();
        }
        if let Some(completed) = patch.completed {
            next.completed = completed;
        }

        Ok(next)
    }

    /// Re-checks record invariants on already-typed data.
    ///
    /// Used by the persistence read path to reject invalid stored state
    /// instead of masking it.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Two instances are the same logical task iff their ids match.
    pub fn same_task(&self, other: &Task) -> bool {
        self.id == other.id
    }
}

fn validate_title(title: &str) -> Result<String, TaskValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

fn validate_estimate(minutes: i64) -> Result<u32, TaskValidationError> {
    u32::try_from(minutes).map_err(|_| TaskValidationError::EstimateOutOfRange { minutes })
}
