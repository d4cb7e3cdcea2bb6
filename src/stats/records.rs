//! Personal record detection

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::calculate_1rm;
use crate::models::Workout;

/// Best estimated 1RM per lowercase exercise name, skipping the workout being saved
pub fn historical_maxes(history: &[Workout], exclude_id: &str) -> HashMap<String, f64> {
    let mut maxes: HashMap<String, f64> = HashMap::new();

    for workout in history.iter().filter(|w| w.id != exclude_id) {
        for exercise in &workout.exercises {
            let best = maxes.entry(exercise.name.to_lowercase()).or_insert(0.0);
            for set in &exercise.sets {
                let est = calculate_1rm(set.weight, set.reps);
                if est > *best {
                    *best = est;
                }
            }
        }
    }

    maxes
}

/// Return a copy of `workout` with every set's PR flag recomputed.
///
/// A set is a PR when its estimated 1RM beats everything recorded for the
/// same exercise name elsewhere in `history` and every earlier set of this
/// workout. Sets without weight or reps never qualify.
pub fn flag_personal_records(workout: &Workout, history: &[Workout]) -> Workout {
    let mut maxes = historical_maxes(history, &workout.id);
    let mut flagged = workout.clone();

    for exercise in &mut flagged.exercises {
        let best = maxes.entry(exercise.name.to_lowercase()).or_insert(0.0);
        for set in &mut exercise.sets {
            let est = calculate_1rm(set.weight, set.reps);
            let is_pr = est > *best && set.weight > 0.0 && set.reps > 0;
            if is_pr {
                *best = est;
            }
            set.is_pr = Some(is_pr);
        }
    }

    flagged
}

/// Best lift recorded for an exercise
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalBest {
    pub exercise: String,
    pub estimated_1rm: f64,
    pub weight: f64,
    pub reps: u32,
    pub date: DateTime<Utc>,
}

/// Best estimated 1RM per exercise across all workouts, sorted by name.
/// The first occurrence (in input order) wins ties.
pub fn personal_bests(workouts: &[Workout]) -> Vec<PersonalBest> {
    let mut bests: HashMap<String, PersonalBest> = HashMap::new();

    for workout in workouts {
        for exercise in &workout.exercises {
            for set in &exercise.sets {
                let est = calculate_1rm(set.weight, set.reps);
                if est <= 0.0 {
                    continue;
                }
                let key = exercise.name.to_lowercase();
                let better = bests.get(&key).is_none_or(|b| est > b.estimated_1rm);
                if better {
                    bests.insert(key, PersonalBest {
                        exercise: exercise.name.clone(),
                        estimated_1rm: est,
                        weight: set.weight,
                        reps: set.reps,
                        date: workout.date,
                    });
                }
            }
        }
    }

    let mut result: Vec<_> = bests.into_values().collect();
    result.sort_by(|a, b| a.exercise.to_lowercase().cmp(&b.exercise.to_lowercase()));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    fn flags(workout: &Workout) -> Vec<bool> {
        workout
            .exercises
            .iter()
            .flat_map(|e| e.sets.iter().map(|s| s.is_pr()))
            .collect()
    }

    #[test]
    fn test_first_ever_set_is_pr() {
        let workout = create_workout_days_ago("w1", 0, vec![
            create_exercise("Bench Press", "Chest", &[(100.0, 10)]),
        ]);
        let flagged = flag_personal_records(&workout, &[]);
        assert_eq!(flags(&flagged), vec![true]);
        let est = calculate_1rm(100.0, 10);
        assert!((est - 133.333).abs() < 1e-3);
    }

    #[test]
    fn test_lower_estimate_than_history_is_not_pr() {
        let first = create_workout_days_ago("w1", 3, vec![
            create_exercise("Bench Press", "Chest", &[(120.0, 5)]),
        ]);
        let second = create_workout_days_ago("w2", 0, vec![
            create_exercise("Bench Press", "Chest", &[(100.0, 10)]),
        ]);
        let flagged = flag_personal_records(&second, &[first]);
        assert_eq!(flags(&flagged), vec![false]);
    }

    #[test]
    fn test_history_match_is_case_insensitive() {
        let first = create_workout_days_ago("w1", 3, vec![
            create_exercise("bench press", "Chest", &[(200.0, 1)]),
        ]);
        let second = create_workout_days_ago("w2", 0, vec![
            create_exercise("BENCH PRESS", "Chest", &[(150.0, 3)]),
        ]);
        let flagged = flag_personal_records(&second, &[first]);
        assert_eq!(flags(&flagged), vec![false]);
    }

    #[test]
    fn test_sequential_comparison_within_workout() {
        // 1RMs: 140, 133.3, 146.6, 146.6
        let workout = create_workout_days_ago("w1", 0, vec![
            create_exercise("Squat", "Legs", &[(120.0, 5), (100.0, 10), (110.0, 10), (110.0, 10)]),
        ]);
        let flagged = flag_personal_records(&workout, &[]);
        assert_eq!(flags(&flagged), vec![true, false, true, false]);
    }

    #[test]
    fn test_running_max_spans_repeated_exercise_entries() {
        let workout = create_workout_days_ago("w1", 0, vec![
            create_exercise("Deadlift", "Back", &[(300.0, 1)]),
            create_exercise("deadlift", "Back", &[(250.0, 3)]),
        ]);
        let flagged = flag_personal_records(&workout, &[]);
        assert_eq!(flags(&flagged), vec![true, false]);
    }

    #[test]
    fn test_zero_weight_or_reps_never_pr() {
        let workout = create_workout_days_ago("w1", 0, vec![
            create_exercise("Push-ups", "Chest", &[(0.0, 20), (50.0, 0)]),
        ]);
        let flagged = flag_personal_records(&workout, &[]);
        assert_eq!(flags(&flagged), vec![false, false]);
    }

    #[test]
    fn test_saved_workout_excluded_from_history() {
        let original = create_workout_days_ago("w1", 0, vec![
            create_exercise("Bench Press", "Chest", &[(100.0, 10)]),
        ]);
        // Editing the same workout must not compete with its own old values
        let flagged = flag_personal_records(&original, &[original.clone()]);
        assert_eq!(flags(&flagged), vec![true]);
    }

    #[test]
    fn test_input_not_mutated() {
        let mut workout = create_workout_days_ago("w1", 0, vec![
            create_exercise("Bench Press", "Chest", &[(100.0, 10)]),
        ]);
        workout.exercises[0].sets[0].is_pr = None;
        let flagged = flag_personal_records(&workout, &[]);
        assert_eq!(workout.exercises[0].sets[0].is_pr, None);
        assert_eq!(flagged.exercises[0].sets[0].is_pr, Some(true));
    }

    #[test]
    fn test_stale_pr_flag_overwritten() {
        let first = create_workout_days_ago("w1", 3, vec![
            create_exercise("Row", "Back", &[(200.0, 5)]),
        ]);
        let mut second = create_workout_days_ago("w2", 0, vec![
            create_exercise("Row", "Back", &[(100.0, 5)]),
        ]);
        second.exercises[0].sets[0].is_pr = Some(true);
        let flagged = flag_personal_records(&second, &[first]);
        assert_eq!(flags(&flagged), vec![false]);
    }

    #[test]
    fn test_historical_maxes() {
        let history = vec![
            create_workout_days_ago("a", 1, vec![create_exercise("Squat", "Legs", &[(100.0, 1), (90.0, 3)])]),
            create_workout_days_ago("b", 2, vec![create_exercise("SQUAT", "Legs", &[(80.0, 1)])]),
        ];
        let maxes = historical_maxes(&history, "none");
        assert!((maxes["squat"] - 99.0).abs() < 1e-9);

        let maxes = historical_maxes(&history, "a");
        assert_eq!(maxes["squat"], 80.0);
    }

    #[test]
    fn test_personal_bests() {
        let workouts = vec![
            create_workout_days_ago("a", 1, vec![create_exercise("Squat", "Legs", &[(100.0, 1)])]),
            create_workout_days_ago("b", 2, vec![
                create_exercise("squat", "Legs", &[(120.0, 1)]),
                create_exercise("Bench Press", "Chest", &[(0.0, 10)]),
            ]),
        ];
        let bests = personal_bests(&workouts);
        assert_eq!(bests.len(), 1);
        assert_eq!(bests[0].weight, 120.0);
        assert_eq!(bests[0].exercise, "squat");
    }
}
