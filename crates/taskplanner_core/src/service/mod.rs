//! Use-case services for the task planner core.
//!
//! # Responsibility
//! - Provide the CRUD and query surface the presentation shell calls.
//! - Enforce write-through persistence as the single mutation chokepoint.

pub mod task_store;
