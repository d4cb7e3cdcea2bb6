//! gymstack - Personal workout tracker
//!
//! Logs workouts, flags personal records and derives volume trends,
//! muscle group load and estimated one-rep maxes from the history.

pub mod backup;
pub mod db;
pub mod exercises;
pub mod logger;
pub mod models;
pub mod stats;
pub mod store;
pub mod tools;
pub mod tui;

#[cfg(test)]
pub(crate) mod fixtures;

pub use db::{KeyValueStore, MemoryStore, SqliteStore};
pub use store::WorkoutStore;
