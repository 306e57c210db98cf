//! Core domain logic for TaskPlanner.
//! This crate is the single source of truth for business invariants.
//!
//! The presentation shell (GUI) lives outside this crate; it calls the
//! [`TaskStore`] surface and renders results and errors. Everything here is
//! single-threaded and synchronous: operations run to completion on the
//! calling thread, and concurrent access to the same data file is
//! unsupported.

pub mod date;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use date::{format_date, parse_date, DateError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
pub use repo::task_repo::{
    JsonTaskRepository, PersistError, PersistResult, TaskRepository, DEFAULT_TASKS_FILE,
};
pub use service::task_store::{SortKey, StatusFilter, StoreError, StoreResult, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
