//! Stats module - workout statistics engine
//!
//! Features:
//! - Volume and estimated one-rep max
//! - Personal record detection
//! - Rolling 7-day muscle group heatmap
//! - Volume trend, per-exercise progress and consistency calendar

pub mod heatmap;
pub mod progress;
pub mod records;

pub use heatmap::{HeatmapEntry, calculate_heatmap};
pub use progress::{
    CalendarDay, DashboardSummary, MAX_CALENDAR_DAYS, ProgressMetric, ProgressPoint, RecentVolumePoint,
    consistency_calendar, dashboard_summary, exercise_progress, last_exercise_stats,
    recent_volume_data,
};
pub use records::{PersonalBest, flag_personal_records, historical_maxes, personal_bests};

use crate::models::{Exercise, Workout};

/// Sort workouts newest first (stable for equal dates)
pub fn sort_workouts(workouts: &[Workout]) -> Vec<Workout> {
    let mut sorted = workouts.to_vec();
    sort_workouts_in_place(&mut sorted);
    sorted
}

pub(crate) fn sort_workouts_in_place(workouts: &mut [Workout]) {
    workouts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Estimated one-rep max (Epley)
pub fn calculate_1rm(weight: f64, reps: u32) -> f64 {
    if reps == 0 || weight == 0.0 {
        return 0.0;
    }
    if reps == 1 {
        return weight;
    }
    weight * (1.0 + reps as f64 / 30.0)
}

/// Raw weight * reps over the sets, no unilateral doubling
pub fn raw_set_volume(exercise: &Exercise) -> f64 {
    exercise.sets.iter().map(|s| s.weight * s.reps as f64).sum()
}

/// Exercise volume; unilateral sets count both sides
pub fn exercise_volume(exercise: &Exercise) -> f64 {
    let volume = raw_set_volume(exercise);
    if exercise.is_unilateral() { volume * 2.0 } else { volume }
}

/// Total workout volume
pub fn workout_volume(workout: &Workout) -> f64 {
    workout.exercises.iter().map(exercise_volume).sum()
}

/// Unique exercise names ever logged, sorted
pub fn available_exercises(workouts: &[Workout]) -> Vec<String> {
    let mut names: Vec<String> = workouts
        .iter()
        .flat_map(|w| w.exercises.iter().map(|e| e.name.clone()))
        .collect();
    names.sort();
    names.dedup();
    names
}
