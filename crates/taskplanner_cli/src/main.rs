//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskplanner_core` linkage.
//! - Exercise the load path against the default store file.

use taskplanner_core::{JsonTaskRepository, TaskStore, DEFAULT_TASKS_FILE};

fn main() {
    println!("taskplanner_core ping={}", taskplanner_core::ping());
    println!("taskplanner_core version={}", taskplanner_core::core_version());

    match TaskStore::open(JsonTaskRepository::new(DEFAULT_TASKS_FILE)) {
        Ok(store) => println!("tasks={}", store.len()),
        Err(err) => eprintln!("failed to open task store: {err}"),
    }
}
