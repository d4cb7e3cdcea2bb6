//! Trends over time: recent volume, per-exercise progress, consistency

use chrono::{DateTime, Days, Duration, Local, NaiveDate, Utc};

use super::{calculate_1rm, exercise_volume, sort_workouts};
use crate::models::{ExerciseSet, Workout};

/// Number of workouts in the volume trend
pub const RECENT_WORKOUTS: usize = 7;

/// Sessions per week the dashboard ring aims for
pub const WEEKLY_GOAL: usize = 4;

/// Longest calendar span, about ten years
pub const MAX_CALENDAR_DAYS: i64 = 3660;

/// Point on the recent volume chart
#[derive(Debug, Clone, PartialEq)]
pub struct RecentVolumePoint {
    /// Short weekday label in local time ("Mon")
    pub label: String,
    pub date: DateTime<Utc>,
    pub volume: f64,
}

/// Volume of the 7 most recent workouts, oldest first.
/// `workouts` must be sorted newest first.
pub fn recent_volume_data(workouts: &[Workout]) -> Vec<RecentVolumePoint> {
    workouts
        .iter()
        .take(RECENT_WORKOUTS)
        .rev()
        .map(|w| RecentVolumePoint {
            label: w.date.with_timezone(&Local).format("%a").to_string(),
            date: w.date,
            volume: w.volume,
        })
        .collect()
}

/// Sets from the most recent time `name` was performed.
/// `workouts` must be sorted newest first.
pub fn last_exercise_stats<'a>(workouts: &'a [Workout], name: &str) -> Option<&'a [ExerciseSet]> {
    workouts.iter().find_map(|workout| {
        workout
            .exercises
            .iter()
            .find(|e| e.matches(name) && !e.sets.is_empty())
            .map(|e| e.sets.as_slice())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMetric {
    /// Best estimated 1RM of the session, rounded
    OneRepMax,
    /// Session volume for the exercise
    Volume,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// Chronological progress of one exercise, one point per workout that includes it.
/// Names match exactly, the same identity `available_exercises` lists.
pub fn exercise_progress(workouts: &[Workout], name: &str, metric: ProgressMetric) -> Vec<ProgressPoint> {
    let mut chronological = sort_workouts(workouts);
    chronological.reverse();

    chronological
        .iter()
        .filter_map(|workout| {
            let exercise = workout.exercises.iter().find(|e| e.name == name)?;
            let value = match metric {
                ProgressMetric::OneRepMax => exercise
                    .sets
                    .iter()
                    .map(|s| calculate_1rm(s.weight, s.reps))
                    .fold(0.0, f64::max)
                    .round(),
                ProgressMetric::Volume => exercise_volume(exercise),
            };
            Some(ProgressPoint { date: workout.date, value })
        })
        .collect()
}

/// One day cell of the consistency calendar
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub volume: f64,
    /// 0 = rest, 1 = trained, 2 = > 10k, 3 = > 20k
    pub intensity: u8,
}

fn day_intensity(volume: f64) -> u8 {
    match volume {
        v if v > 20_000.0 => 3,
        v if v > 10_000.0 => 2,
        v if v > 0.0 => 1,
        _ => 0,
    }
}

/// Daily volume from `today - days` through `today` (local dates).
/// `days` is clamped to `0..=MAX_CALENDAR_DAYS`.
pub fn consistency_calendar(workouts: &[Workout], today: NaiveDate, days: i64) -> Vec<CalendarDay> {
    let days = days.clamp(0, MAX_CALENDAR_DAYS) as u64;
    let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);

    start
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|date| {
            let volume: f64 = workouts
                .iter()
                .filter(|w| w.date.with_timezone(&Local).date_naive() == date)
                .map(|w| w.volume)
                .sum();
            CalendarDay { date, volume, intensity: day_intensity(volume) }
        })
        .collect()
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_workouts: usize,
    pub this_week: usize,
    /// Progress towards the weekly goal, 0-100
    pub goal_progress: f64,
}

pub fn dashboard_summary(workouts: &[Workout], now: DateTime<Utc>) -> DashboardSummary {
    let week_ago = now - Duration::days(7);
    let this_week = workouts.iter().filter(|w| w.date >= week_ago).count();

    DashboardSummary {
        total_workouts: workouts.len(),
        this_week,
        goal_progress: (this_week as f64 / WEEKLY_GOAL as f64 * 100.0).min(100.0),
    }
}
