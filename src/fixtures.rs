//! Test helpers for building workouts

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::{Exercise, ExerciseSet, Workout};
use crate::stats::workout_volume;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

pub fn create_set(weight: f64, reps: u32) -> ExerciseSet {
    ExerciseSet::new(reps, weight)
}

pub fn create_exercise(name: &str, muscle: &str, sets: &[(f64, u32)]) -> Exercise {
    Exercise::new(name, muscle, sets.iter().map(|(w, r)| create_set(*w, *r)).collect())
}

pub fn create_unilateral(name: &str, muscle: &str, sets: &[(f64, u32)]) -> Exercise {
    let mut ex = create_exercise(name, muscle, sets);
    ex.is_unilateral = Some(true);
    ex
}

pub fn create_workout(id: &str, date: DateTime<Utc>, exercises: Vec<Exercise>) -> Workout {
    let mut workout = Workout {
        id: id.to_string(),
        date,
        name: format!("Workout {}", id),
        exercises,
        volume: 0.0,
        duration_minutes: None,
    };
    workout.volume = workout_volume(&workout);
    workout
}

pub fn create_workout_days_ago(id: &str, days_ago: i64, exercises: Vec<Exercise>) -> Workout {
    create_workout(id, base_time() - Duration::days(days_ago), exercises)
}
