//! Exercise definitions - built-in muscle groups and common exercise catalog

use serde::{Deserialize, Serialize};

use crate::models::CustomExercise;

/// Built-in muscle groups; users may add their own as plain strings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
    Core,
}

impl MuscleGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Core => "Core",
        }
    }

    /// All muscle groups for iteration
    pub fn all() -> &'static [MuscleGroup] {
        &[
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Legs,
            MuscleGroup::Arms,
            MuscleGroup::Shoulders,
            MuscleGroup::Core,
        ]
    }

    /// Parse a built-in group name (case-insensitive)
    pub fn from_name(name: &str) -> Option<MuscleGroup> {
        Self::all()
            .iter()
            .copied()
            .find(|g| g.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Common exercises for quick picking during logging
    pub fn common_exercises(&self) -> &'static [&'static str] {
        match self {
            MuscleGroup::Chest => &["Bench Press", "Incline Dumbbell Press", "Push-ups", "Cable Crossovers"],
            MuscleGroup::Back => &["Pull-ups", "Barbell Row", "Lat Pulldown", "Deadlift"],
            MuscleGroup::Legs => &["Squat", "Leg Press", "Romanian Deadlift", "Calf Raises"],
            MuscleGroup::Arms => &["Bicep Curls", "Tricep Extensions", "Hammer Curls", "Skull Crushers"],
            MuscleGroup::Shoulders => &["Overhead Press", "Lateral Raises", "Front Raises", "Face Pulls"],
            MuscleGroup::Core => &["Plank", "Crunches", "Leg Raises", "Russian Twists"],
        }
    }
}

impl std::fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in groups followed by custom ones, duplicates skipped
pub fn all_muscle_groups(custom: &[String]) -> Vec<String> {
    let mut groups: Vec<String> = MuscleGroup::all().iter().map(|g| g.as_str().to_string()).collect();
    for group in custom {
        if !groups.iter().any(|g| g == group) {
            groups.push(group.clone());
        }
    }
    groups
}

/// Exercise names to offer for a muscle group: catalog first, then custom entries
pub fn exercise_suggestions(group: &str, custom: &[CustomExercise]) -> Vec<String> {
    let mut names: Vec<String> = MuscleGroup::from_name(group)
        .map(|g| g.common_exercises().iter().map(|n| n.to_string()).collect())
        .unwrap_or_default();

    for ex in custom.iter().filter(|c| c.muscle_group == group) {
        if !names.iter().any(|n| n.eq_ignore_ascii_case(&ex.name)) {
            names.push(ex.name.clone());
        }
    }
    names
}

/// Find the built-in group for a catalog exercise name
pub fn find_muscle_group(exercise_name: &str) -> Option<MuscleGroup> {
    MuscleGroup::all().iter().copied().find(|g| {
        g.common_exercises()
            .iter()
            .any(|n| n.eq_ignore_ascii_case(exercise_name))
    })
}

/// Muscle group for an exercise name: custom entries first, then the catalog
pub fn resolve_muscle_group(exercise_name: &str, custom: &[CustomExercise]) -> Option<String> {
    custom
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(exercise_name.trim()))
        .map(|c| c.muscle_group.clone())
        .or_else(|| find_muscle_group(exercise_name.trim()).map(|g| g.as_str().to_string()))
}
