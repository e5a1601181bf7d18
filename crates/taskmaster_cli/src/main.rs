//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskmaster_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use taskmaster_core::{SqliteLocalStore, TaskStore};

fn main() {
    println!("taskmaster_core version={}", taskmaster_core::core_version());

    // In-memory store probe: proves migrations and the task path link and run
    // without touching any on-disk state.
    match SqliteLocalStore::open_in_memory()
        .map_err(|err| err.to_string())
        .and_then(|store| {
            TaskStore::open(store, "smoke@local").map_err(|err| err.to_string())
        }) {
        Ok(store) => println!("store probe=ok tasks={}", store.tasks().len()),
        Err(err) => {
            eprintln!("store probe=failed error={err}");
            std::process::exit(1);
        }
    }
}
