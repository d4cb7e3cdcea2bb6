//! Session logging - building a workout from user input

use chrono::{DateTime, Utc};

use crate::models::{Exercise, ExerciseSet, Workout, WorkoutTemplate, new_id};
use crate::stats::workout_volume;

/// Name used when a workout is finished without one
pub const DEFAULT_WORKOUT_NAME: &str = "Quick Session";

/// Reps from user input; fractions truncate, anything unparseable becomes 0
pub fn parse_reps(input: &str) -> u32 {
    match input.trim().parse::<f64>() {
        Ok(r) if r.is_finite() && r > 0.0 => r.trunc() as u32,
        _ => 0,
    }
}

/// Weight from user input; unparseable or negative becomes 0
pub fn parse_weight(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(w) if w.is_finite() && w > 0.0 => w,
        _ => 0.0,
    }
}

/// Parse "WEIGHTxREPS" (e.g. "135x10"); a bare number is reps at bodyweight
pub fn parse_set(input: &str) -> ExerciseSet {
    match input.trim().to_lowercase().split_once('x') {
        Some((weight, reps)) => ExerciseSet::new(parse_reps(reps), parse_weight(weight)),
        None => ExerciseSet::new(parse_reps(input), 0.0),
    }
}

/// Exercise as entered, before ghost values are applied
#[derive(Debug, Clone)]
pub struct ExerciseEntry {
    pub name: String,
    pub muscle_group: String,
    pub sets: Vec<ExerciseSet>,
    pub is_bodyweight: bool,
    pub is_unilateral: bool,
}

/// Parse "NAME:GROUP:SETS[:FLAGS]", e.g. "Bench Press:Chest:135x10,135x8".
///
/// GROUP may be left empty for the caller to resolve. A set written as "_"
/// is blank and will take the previous session's values. Flags are `u`
/// (unilateral) and `bw` (bodyweight).
pub fn parse_exercise_spec(spec: &str) -> Option<ExerciseEntry> {
    let mut parts = spec.split(':');
    let name = parts.next()?.trim();
    if name.is_empty() {
        return None;
    }
    let muscle_group = parts.next().unwrap_or("").trim().to_string();
    let sets = parts
        .next()
        .unwrap_or("")
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(parse_set)
        .collect();

    let mut entry = ExerciseEntry {
        name: name.to_string(),
        muscle_group,
        sets,
        is_bodyweight: false,
        is_unilateral: false,
    };
    for flag in parts {
        match flag.trim().to_lowercase().as_str() {
            "u" | "unilateral" => entry.is_unilateral = true,
            "bw" | "bodyweight" => entry.is_bodyweight = true,
            _ => {}
        }
    }
    Some(entry)
}

/// Fill blank (zero) weight/reps from the previous session's set at the
/// same position, then drop sets that still have no reps
pub fn apply_ghost(sets: &[ExerciseSet], ghost: Option<&[ExerciseSet]>) -> Vec<ExerciseSet> {
    sets.iter()
        .enumerate()
        .map(|(i, set)| {
            let mut set = set.clone();
            if let Some(prev) = ghost.and_then(|g| g.get(i)) {
                if set.weight == 0.0 {
                    set.weight = prev.weight;
                }
                if set.reps == 0 {
                    set.reps = prev.reps;
                }
            }
            set
        })
        .filter(|s| s.reps > 0)
        .collect()
}

/// Workout being logged or edited
#[derive(Debug, Clone, Default)]
pub struct WorkoutDraft {
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub duration_minutes: Option<f64>,
    /// Id and date of the workout being edited
    editing: Option<(String, DateTime<Utc>)>,
}

impl WorkoutDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Start editing an existing workout; finishing keeps its id and date
    pub fn edit(workout: &Workout) -> Self {
        Self {
            name: workout.name.clone(),
            exercises: workout.exercises.clone(),
            duration_minutes: workout.duration_minutes,
            editing: Some((workout.id.clone(), workout.date)),
        }
    }

    /// Start from a template's exercises with fresh ids
    pub fn from_template(template: &WorkoutTemplate) -> Self {
        let exercises = template
            .exercises
            .iter()
            .map(|ex| Exercise {
                id: new_id(),
                sets: ex
                    .sets
                    .iter()
                    .map(|s| ExerciseSet { id: new_id(), completed: false, is_pr: None, ..s.clone() })
                    .collect(),
                ..ex.clone()
            })
            .collect();
        Self {
            name: template.name.trim_end_matches(" Template").to_string(),
            exercises,
            ..Default::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Add an exercise after ghost fill. Returns false when no set has reps.
    pub fn add_exercise(&mut self, entry: ExerciseEntry, ghost: Option<&[ExerciseSet]>) -> bool {
        if entry.name.trim().is_empty() || entry.muscle_group.trim().is_empty() {
            return false;
        }
        let sets = apply_ghost(&entry.sets, ghost);
        if sets.is_empty() {
            return false;
        }

        let mut exercise = Exercise::new(entry.name.trim(), entry.muscle_group.trim(), sets);
        exercise.is_bodyweight = entry.is_bodyweight.then_some(true);
        exercise.is_unilateral = entry.is_unilateral.then_some(true);
        self.exercises.push(exercise);
        true
    }

    pub fn remove_exercise(&mut self, index: usize) -> Option<Exercise> {
        (index < self.exercises.len()).then(|| self.exercises.remove(index))
    }

    /// Build the workout record; PR flags are assigned when the store saves it
    pub fn finish(self, now: DateTime<Utc>) -> Workout {
        let (id, date) = self.editing.unwrap_or_else(|| (new_id(), now));
        let name = match self.name.trim() {
            "" => DEFAULT_WORKOUT_NAME.to_string(),
            name => name.to_string(),
        };

        let mut workout = Workout {
            id,
            date,
            name,
            exercises: self.exercises,
            volume: 0.0,
            duration_minutes: self.duration_minutes,
        };
        workout.volume = workout_volume(&workout);
        workout
    }
}

/// Reusable skeleton of a workout with completion and PR flags cleared
pub fn template_from_workout(workout: &Workout) -> WorkoutTemplate {
    WorkoutTemplate {
        id: new_id(),
        name: format!("{} Template", workout.name),
        exercises: workout
            .exercises
            .iter()
            .map(|ex| Exercise {
                sets: ex
                    .sets
                    .iter()
                    .map(|s| ExerciseSet { completed: false, is_pr: None, ..s.clone() })
                    .collect(),
                ..ex.clone()
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    fn entry(name: &str, sets: Vec<ExerciseSet>) -> ExerciseEntry {
        ExerciseEntry {
            name: name.to_string(),
            muscle_group: "Chest".to_string(),
            sets,
            is_bodyweight: false,
            is_unilateral: false,
        }
    }

    #[test]
    fn test_parse_reps_coerces() {
        assert_eq!(parse_reps("12"), 12);
        assert_eq!(parse_reps(" 8 "), 8);
        assert_eq!(parse_reps(""), 0);
        assert_eq!(parse_reps("abc"), 0);
        assert_eq!(parse_reps("-3"), 0);
    }

    #[test]
    fn test_parse_reps_truncates_fractions() {
        assert_eq!(parse_reps("8.5"), 8);
        assert_eq!(parse_reps("0.9"), 0);
        assert_eq!(parse_set("100x8.5").reps, 8);
    }

    #[test]
    fn test_parse_weight_coerces() {
        assert_eq!(parse_weight("135"), 135.0);
        assert_eq!(parse_weight("22.5"), 22.5);
        assert_eq!(parse_weight(""), 0.0);
        assert_eq!(parse_weight("heavy"), 0.0);
        assert_eq!(parse_weight("-10"), 0.0);
        assert_eq!(parse_weight("NaN"), 0.0);
    }

    #[test]
    fn test_parse_set() {
        let set = parse_set("135x10");
        assert_eq!((set.weight, set.reps), (135.0, 10));
        let set = parse_set("12");
        assert_eq!((set.weight, set.reps), (0.0, 12));
        let set = parse_set("junkXjunk");
        assert_eq!((set.weight, set.reps), (0.0, 0));
    }

    #[test]
    fn test_parse_exercise_spec() {
        let entry = parse_exercise_spec("Dumbbell Row:Back:60x10,_,65x8:u").unwrap();
        assert_eq!(entry.name, "Dumbbell Row");
        assert_eq!(entry.muscle_group, "Back");
        assert_eq!(entry.sets.len(), 3);
        assert_eq!((entry.sets[1].weight, entry.sets[1].reps), (0.0, 0));
        assert!(entry.is_unilateral);
        assert!(!entry.is_bodyweight);
    }

    #[test]
    fn test_parse_exercise_spec_without_group() {
        let entry = parse_exercise_spec("Pull-ups::12,10:bw").unwrap();
        assert!(entry.muscle_group.is_empty());
        assert_eq!(entry.sets[0].reps, 12);
        assert!(entry.is_bodyweight);
        assert!(parse_exercise_spec(":Chest:100x5").is_none());
    }

    #[test]
    fn test_apply_ghost_fills_blanks_by_index() {
        let ghost = vec![create_set(100.0, 8), create_set(105.0, 6)];
        let sets = vec![create_set(0.0, 0), create_set(110.0, 0), create_set(0.0, 0)];
        let filled = apply_ghost(&sets, Some(&ghost));
        assert_eq!(filled.len(), 2);
        assert_eq!((filled[0].weight, filled[0].reps), (100.0, 8));
        assert_eq!((filled[1].weight, filled[1].reps), (110.0, 6));
    }

    #[test]
    fn test_apply_ghost_without_history_drops_empty_sets() {
        let sets = vec![create_set(50.0, 0), create_set(0.0, 15)];
        let filled = apply_ghost(&sets, None);
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].reps, 15);
    }

    #[test]
    fn test_add_exercise_rejects_empty() {
        let mut draft = WorkoutDraft::new("Push");
        assert!(!draft.add_exercise(entry("Bench Press", vec![create_set(100.0, 0)]), None));
        assert!(!draft.add_exercise(entry("  ", vec![create_set(100.0, 5)]), None));
        assert!(draft.exercises.is_empty());
    }

    #[test]
    fn test_finish_new_workout() {
        let mut draft = WorkoutDraft::new("  ");
        let mut lunge = entry("Lunge", vec![create_set(50.0, 8)]);
        lunge.is_unilateral = true;
        assert!(draft.add_exercise(entry("Bench Press", vec![create_set(100.0, 10)]), None));
        assert!(draft.add_exercise(lunge, None));

        let workout = draft.finish(base_time());
        assert_eq!(workout.name, DEFAULT_WORKOUT_NAME);
        assert_eq!(workout.date, base_time());
        assert_eq!(workout.volume, 1000.0 + 800.0);
        assert_eq!(workout.exercises[1].is_unilateral, Some(true));
        assert_eq!(workout.exercises[0].is_unilateral, None);
    }

    #[test]
    fn test_edit_keeps_id_and_date() {
        let original = create_workout_days_ago("w1", 3, vec![create_exercise("Squat", "Legs", &[(100.0, 5)])]);
        let mut draft = WorkoutDraft::edit(&original);
        assert!(draft.is_editing());
        draft.remove_exercise(0).unwrap();
        assert!(draft.remove_exercise(5).is_none());

        let workout = draft.finish(base_time());
        assert_eq!(workout.id, "w1");
        assert_eq!(workout.date, original.date);
        assert_eq!(workout.volume, 0.0);
    }

    #[test]
    fn test_template_clears_flags() {
        let mut workout = create_workout_days_ago("w1", 0, vec![create_exercise("Squat", "Legs", &[(100.0, 5)])]);
        workout.name = "Leg Day".into();
        workout.exercises[0].sets[0].completed = true;
        workout.exercises[0].sets[0].is_pr = Some(true);

        let template = template_from_workout(&workout);
        assert_eq!(template.name, "Leg Day Template");
        let set = &template.exercises[0].sets[0];
        assert!(!set.completed);
        assert_eq!(set.is_pr, None);
        assert_eq!(set.weight, 100.0);
    }

    #[test]
    fn test_draft_from_template() {
        let workout = create_workout_days_ago("w1", 0, vec![create_exercise("Squat", "Legs", &[(100.0, 5)])]);
        let template = template_from_workout(&workout);
        let draft = WorkoutDraft::from_template(&template);
        assert_eq!(draft.name, "Workout w1");
        assert!(!draft.is_editing());
        assert_eq!(draft.exercises[0].name, "Squat");
        assert_eq!(draft.exercises[0].sets[0].reps, 5);
    }
}
