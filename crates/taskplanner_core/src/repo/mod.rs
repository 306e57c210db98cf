//! Persistence boundary for the task planner core.
//!
//! # Responsibility
//! - Define the repository contract the store saves and loads through.
//! - Keep file-format details out of the service layer.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it.
//! - Write paths never leave a truncated document behind.

pub mod task_repo;
