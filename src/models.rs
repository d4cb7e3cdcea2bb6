//! Workout records - the data model shared by storage, stats and the store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generate a record id: unix millis plus a random suffix
pub fn new_id() -> String {
    format!("{}-{:04x}", Utc::now().timestamp_millis(), rand::random::<u16>())
}

/// A single set: reps at a weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    pub id: String,
    pub reps: u32,
    pub weight: f64,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "isPR", default, skip_serializing_if = "Option::is_none")]
    pub is_pr: Option<bool>,
}

impl ExerciseSet {
    pub fn new(reps: u32, weight: f64) -> Self {
        Self {
            id: new_id(),
            reps,
            weight,
            completed: false,
            is_pr: None,
        }
    }

    pub fn is_pr(&self) -> bool {
        self.is_pr.unwrap_or(false)
    }
}

/// Exercise performed within a workout (or planned in a template)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub muscle_group: String,
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bodyweight: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_unilateral: Option<bool>,
}

impl Exercise {
    pub fn new(name: impl Into<String>, muscle_group: impl Into<String>, sets: Vec<ExerciseSet>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            muscle_group: muscle_group.into(),
            sets,
            is_bodyweight: None,
            is_unilateral: None,
        }
    }

    /// Each set counts one side only
    pub fn is_unilateral(&self) -> bool {
        self.is_unilateral.unwrap_or(false)
    }

    pub fn is_bodyweight(&self) -> bool {
        self.is_bodyweight.unwrap_or(false)
    }

    /// Case-insensitive name identity
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Logged training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub date: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Cached total volume, recomputed whenever the workout is saved
    #[serde(default)]
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
}

impl Workout {
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub fn pr_count(&self) -> usize {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .filter(|s| s.is_pr())
            .count()
    }
}

/// User-defined catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomExercise {
    pub id: String,
    pub name: String,
    pub muscle_group: String,
}

/// Reusable exercise skeleton cloned from a past workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}
