//! Workout store - owns the collections and keeps them persisted
//!
//! Every mutation builds a new collection, swaps it in and writes it to
//! storage. Storage failures are logged; the in-memory state stays
//! authoritative for the session.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::db::{
    EXERCISES_KEY, KeyValueStore, MUSCLES_KEY, TEMPLATES_KEY, WORKOUTS_KEY, load_collection,
    persist_collection,
};
use crate::exercises::all_muscle_groups;
use crate::logger::template_from_workout;
use crate::models::{CustomExercise, ExerciseSet, Workout, WorkoutTemplate};
use crate::stats::{
    self, CalendarDay, DashboardSummary, HeatmapEntry, PersonalBest, ProgressMetric,
    ProgressPoint, RecentVolumePoint,
};

/// Coordinator over the four persisted collections
pub struct WorkoutStore<S: KeyValueStore> {
    storage: S,
    workouts: Vec<Workout>,
    custom_exercises: Vec<CustomExercise>,
    custom_muscle_groups: Vec<String>,
    templates: Vec<WorkoutTemplate>,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    /// Load every collection from storage
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            workouts: Vec::new(),
            custom_exercises: Vec::new(),
            custom_muscle_groups: Vec::new(),
            templates: Vec::new(),
        };
        store.reload();
        store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Re-read everything from storage, dropping in-memory state
    pub fn reload(&mut self) {
        let workouts: Vec<Workout> = load_collection(&self.storage, WORKOUTS_KEY);
        self.workouts = stats::sort_workouts(&workouts);
        self.custom_exercises = load_collection(&self.storage, EXERCISES_KEY);
        self.custom_muscle_groups = load_collection(&self.storage, MUSCLES_KEY);
        self.templates = load_collection(&self.storage, TEMPLATES_KEY);

        debug!("Loaded {} workouts, {} templates", self.workouts.len(), self.templates.len());
    }

    // === Workouts ===

    /// PR-flag, recompute volume, then insert. Returns the stored record.
    pub fn add_workout(&mut self, workout: Workout) -> Workout {
        let saved = self.finalize(&workout);

        let mut workouts = self.workouts.clone();
        workouts.push(saved.clone());
        self.replace_workouts(workouts);

        info!("Added workout {} ({} PRs)", saved.id, saved.pr_count());
        saved
    }

    /// Replace the workout with the same id. Unknown ids change nothing.
    pub fn update_workout(&mut self, workout: Workout) -> Option<Workout> {
        if !self.workouts.iter().any(|w| w.id == workout.id) {
            warn!("Update for unknown workout {}", workout.id);
            return None;
        }

        let saved = self.finalize(&workout);
        let workouts = self
            .workouts
            .iter()
            .map(|w| if w.id == saved.id { saved.clone() } else { w.clone() })
            .collect();
        self.replace_workouts(workouts);

        info!("Updated workout {} ({} PRs)", saved.id, saved.pr_count());
        Some(saved)
    }

    pub fn delete_workout(&mut self, id: &str) -> bool {
        let workouts: Vec<Workout> = self.workouts.iter().filter(|w| w.id != id).cloned().collect();
        if workouts.len() == self.workouts.len() {
            return false;
        }
        self.replace_workouts(workouts);
        info!("Deleted workout {}", id);
        true
    }

    fn finalize(&self, workout: &Workout) -> Workout {
        let mut saved = stats::flag_personal_records(workout, &self.workouts);
        saved.volume = stats::workout_volume(&saved);
        saved
    }

    fn replace_workouts(&mut self, mut workouts: Vec<Workout>) {
        stats::sort_workouts_in_place(&mut workouts);
        self.workouts = workouts;
        persist_collection(&mut self.storage, WORKOUTS_KEY, &self.workouts);
    }

    // === Custom exercises ===

    pub fn add_custom_exercise(&mut self, exercise: CustomExercise) {
        let mut exercises = self.custom_exercises.clone();
        exercises.push(exercise);
        self.custom_exercises = exercises;
        persist_collection(&mut self.storage, EXERCISES_KEY, &self.custom_exercises);
    }

    pub fn delete_custom_exercise(&mut self, id: &str) -> bool {
        let before = self.custom_exercises.len();
        self.custom_exercises = self.custom_exercises.iter().filter(|e| e.id != id).cloned().collect();
        persist_collection(&mut self.storage, EXERCISES_KEY, &self.custom_exercises);
        self.custom_exercises.len() != before
    }

    // === Custom muscle groups ===

    /// No-op when the group already exists. Returns whether it was added.
    pub fn add_custom_muscle_group(&mut self, group: &str) -> bool {
        if self.custom_muscle_groups.iter().any(|g| g == group) {
            debug!("Muscle group {} already present", group);
            return false;
        }
        let mut groups = self.custom_muscle_groups.clone();
        groups.push(group.to_string());
        self.custom_muscle_groups = groups;
        persist_collection(&mut self.storage, MUSCLES_KEY, &self.custom_muscle_groups);
        true
    }

    /// Exercises already referencing the group keep the name as-is
    pub fn delete_custom_muscle_group(&mut self, group: &str) -> bool {
        let before = self.custom_muscle_groups.len();
        self.custom_muscle_groups = self.custom_muscle_groups.iter().filter(|g| *g != group).cloned().collect();
        persist_collection(&mut self.storage, MUSCLES_KEY, &self.custom_muscle_groups);
        self.custom_muscle_groups.len() != before
    }

    // === Templates ===

    /// Insert, or replace the template with the same id
    pub fn save_template(&mut self, template: WorkoutTemplate) {
        let mut templates: Vec<WorkoutTemplate> =
            self.templates.iter().filter(|t| t.id != template.id).cloned().collect();
        templates.push(template);
        self.templates = templates;
        persist_collection(&mut self.storage, TEMPLATES_KEY, &self.templates);
    }

    pub fn delete_template(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates = self.templates.iter().filter(|t| t.id != id).cloned().collect();
        persist_collection(&mut self.storage, TEMPLATES_KEY, &self.templates);
        self.templates.len() != before
    }

    /// Clone a logged workout into a new template
    pub fn save_workout_as_template(&mut self, workout_id: &str) -> Option<WorkoutTemplate> {
        let template = template_from_workout(self.find_workout(workout_id)?);
        self.save_template(template.clone());
        info!("Saved template {} from workout {}", template.name, workout_id);
        Some(template)
    }

    // === Import ===

    /// Wholesale replacement of workouts, custom exercises and muscle groups
    pub fn import_data(
        &mut self,
        workouts: Vec<Workout>,
        custom_exercises: Vec<CustomExercise>,
        custom_muscle_groups: Vec<String>,
    ) {
        let workouts = workouts
            .into_iter()
            .map(|mut w| {
                w.volume = stats::workout_volume(&w);
                w
            })
            .collect();
        self.replace_workouts(workouts);

        self.custom_exercises = custom_exercises;
        persist_collection(&mut self.storage, EXERCISES_KEY, &self.custom_exercises);

        self.custom_muscle_groups = custom_muscle_groups;
        persist_collection(&mut self.storage, MUSCLES_KEY, &self.custom_muscle_groups);

        info!("Imported {} workouts", self.workouts.len());
    }

    // === Queries ===

    /// Workouts, newest first
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn history(&self) -> Vec<Workout> {
        stats::sort_workouts(&self.workouts)
    }

    pub fn custom_exercises(&self) -> &[CustomExercise] {
        &self.custom_exercises
    }

    pub fn custom_muscle_groups(&self) -> &[String] {
        &self.custom_muscle_groups
    }

    /// Built-in groups followed by custom ones
    pub fn muscle_groups(&self) -> Vec<String> {
        all_muscle_groups(&self.custom_muscle_groups)
    }

    pub fn templates(&self) -> &[WorkoutTemplate] {
        &self.templates
    }

    pub fn find_workout(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub fn find_template(&self, id: &str) -> Option<&WorkoutTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn recent_volume_data(&self) -> Vec<RecentVolumePoint> {
        stats::recent_volume_data(&self.workouts)
    }

    pub fn muscle_heatmap(&self, now: DateTime<Utc>) -> Vec<HeatmapEntry> {
        stats::calculate_heatmap(&self.workouts, now)
    }

    pub fn last_exercise_stats(&self, name: &str) -> Option<&[ExerciseSet]> {
        stats::last_exercise_stats(&self.workouts, name)
    }

    pub fn exercise_progress(&self, name: &str, metric: ProgressMetric) -> Vec<ProgressPoint> {
        stats::exercise_progress(&self.workouts, name, metric)
    }

    pub fn available_exercises(&self) -> Vec<String> {
        stats::available_exercises(&self.workouts)
    }

    pub fn personal_bests(&self) -> Vec<PersonalBest> {
        stats::personal_bests(&self.workouts)
    }

    pub fn consistency_calendar(&self, today: NaiveDate, days: i64) -> Vec<CalendarDay> {
        stats::consistency_calendar(&self.workouts, today, days)
    }

    pub fn dashboard_summary(&self, now: DateTime<Utc>) -> DashboardSummary {
        stats::dashboard_summary(&self.workouts, now)
    }
}
