//! Task store use-case service.
//!
//! # Responsibility
//! - Own the authoritative in-memory task collection for the session.
//! - Route every mutation through validation and write-through persistence.
//!
//! # Invariants
//! - Ids come from a monotone counter and are never reused, even after
//!   deletions.
//! - After a successful operation the persisted document matches the
//!   in-memory collection; a failed save rolls the mutation back.
//! - Query results are owned snapshots; callers cannot mutate the store
//!   through them.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
use crate::repo::task_repo::{PersistError, TaskRepository};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-surface error, covering all three failure kinds the shell sees.
#[derive(Debug)]
pub enum StoreError {
    Validation(TaskValidationError),
    NotFound(TaskId),
    Persistence(PersistError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistError> for StoreError {
    fn from(value: PersistError) -> Self {
        Self::Persistence(value)
    }
}

/// Sort orders for the canonical collection.
///
/// Every sort is stable: tasks comparing equal keep their prior relative
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Earliest deadline first.
    Deadline,
    /// Case-insensitive title, ascending.
    Title,
    /// Incomplete tasks before completed ones.
    Status,
    /// Insertion order, i.e. ascending id.
    None,
}

/// Completion-status predicate for [`TaskStore::filter_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Completed,
    NotCompleted,
}

impl StatusFilter {
    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::NotCompleted => !task.completed,
        }
    }
}

/// Authoritative in-memory task collection with write-through persistence.
///
/// One instance per process, constructed by the shell and passed by
/// reference; never a hidden singleton.
#[derive(Debug)]
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Opens a store over the given repository, loading persisted tasks.
    ///
    /// A missing file yields an empty store. The id counter is seeded one
    /// above the highest persisted id so deleted ids stay retired.
    pub fn open(repo: R) -> StoreResult<Self> {
        let tasks = repo.load()?;
        let next_id = tasks.iter().map(|task| task.id).max().map_or(1, |id| id + 1);
        info!(
            "event=store_open module=service status=ok count={} next_id={next_id}",
            tasks.len()
        );
        Ok(Self {
            repo,
            tasks,
            next_id,
        })
    }

    /// Validates a draft, assigns the next id and appends the task.
    pub fn add(&mut self, draft: &TaskDraft) -> StoreResult<Task> {
        let task = Task::new(self.next_id, draft)?;

        self.tasks.push(task.clone());
        if let Err(err) = self.repo.save(&self.tasks) {
            self.tasks.pop();
            return Err(err.into());
        }
        // The counter only advances once the task is durably stored, so a
        // failed add does not burn an id.
        self.next_id += 1;

        Ok(task)
    }

    /// Returns a copy of the task with the given id.
    pub fn get(&self, id: TaskId) -> StoreResult<Task> {
        self.position(id).map(|index| self.tasks[index].clone())
    }

    /// Applies a sparse patch to the task with the given id.
    ///
    /// On validation or persistence failure the stored task is unchanged.
    pub fn update(&mut self, id: TaskId, patch: &TaskPatch) -> StoreResult<Task> {
        let index = self.position(id)?;
        let updated = self.tasks[index].apply(patch)?;

        let previous = std::mem::replace(&mut self.tasks[index], updated.clone());
        if let Err(err) = self.repo.save(&self.tasks) {
            self.tasks[index] = previous;
            return Err(err.into());
        }

        Ok(updated)
    }

    /// Removes the task with the given id; the id is never reassigned.
    pub fn delete(&mut self, id: TaskId) -> StoreResult<()> {
        let index = self.position(id)?;

        let removed = self.tasks.remove(index);
        if let Err(err) = self.repo.save(&self.tasks) {
            self.tasks.insert(index, removed);
            return Err(err.into());
        }

        Ok(())
    }

    /// Flips the completion flag of the task with the given id.
    pub fn toggle_completed(&mut self, id: TaskId) -> StoreResult<Task> {
        let completed = !self.get(id)?.completed;
        self.set_completed(id, completed)
    }

    /// Marks the task explicitly complete or incomplete.
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> StoreResult<Task> {
        self.update(
            id,
            &TaskPatch {
                completed: Some(completed),
                ..TaskPatch::default()
            },
        )
    }

    /// Tasks whose title contains `query` case-insensitively.
    ///
    /// An empty (or whitespace-only) query returns the whole collection.
    /// Canonical order is preserved; the store is not mutated.
    pub fn search(&self, query: &str) -> Vec<Task> {
        filter_contains(&self.tasks, query, |task| task.title.as_str())
    }

    /// Same contract as [`TaskStore::search`], over the notes field.
    pub fn search_notes(&self, query: &str) -> Vec<Task> {
        filter_contains(&self.tasks, query, |task| task.notes.as_str())
    }

    /// Tasks matching the completion predicate, canonical order preserved.
    pub fn filter_by(&self, filter: StatusFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    /// Stably reorders the canonical collection.
    ///
    /// `SortKey::None` restores insertion order by sorting on id. The new
    /// order is part of the persisted document, so reordering saves like
    /// any other mutation.
    pub fn sort_by(&mut self, key: SortKey) -> StoreResult<()> {
        let previous = self.tasks.clone();

        match key {
            SortKey::Deadline => self.tasks.sort_by_key(|task| task.deadline),
            SortKey::Title => self.tasks.sort_by_key(|task| task.title.to_lowercase()),
            SortKey::Status => self.tasks.sort_by_key(|task| task.completed),
            SortKey::None => self.tasks.sort_by_key(|task| task.id),
        }

        if let Err(err) = self.repo.save(&self.tasks) {
            self.tasks = previous;
            return Err(err.into());
        }

        Ok(())
    }

    /// Removes every task. The id counter keeps rising; cleared ids are
    /// retired like deleted ones.
    pub fn clear(&mut self) -> StoreResult<()> {
        let previous = std::mem::take(&mut self.tasks);
        if let Err(err) = self.repo.save(&self.tasks) {
            self.tasks = previous;
            return Err(err.into());
        }
        Ok(())
    }

    /// Snapshot of the whole collection in canonical order.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: TaskId) -> StoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

fn filter_contains(tasks: &[Task], query: &str, field: fn(&Task) -> &str) -> Vec<Task> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return tasks.to_vec();
    }
    tasks
        .iter()
        .filter(|task| field(task).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
