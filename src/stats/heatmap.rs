//! Muscle group load over the trailing week

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::raw_set_volume;
use crate::models::Workout;

/// Heatmap window
pub const HEATMAP_DAYS: i64 = 7;

/// Relative training intensity for one muscle group
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapEntry {
    pub muscle: String,
    pub volume: f64,
    /// 0-100, relative to the most trained group
    pub intensity: f64,
}

impl HeatmapEntry {
    /// Text bar for terminal output
    pub fn bar(&self) -> &'static str {
        match self.intensity {
            i if i >= 75.0 => "[++++]",
            i if i >= 50.0 => "[+++.]",
            i if i >= 25.0 => "[++..]",
            i if i > 0.0 => "[+...]",
            _ => "[....]",
        }
    }
}

/// Per-muscle-group intensity for workouts in the trailing 7 days.
///
/// `workouts` must be sorted newest first; the scan stops at the first
/// workout older than `now - 7 days`. Sets contribute plain weight * reps,
/// unilateral exercises are not doubled here.
pub fn calculate_heatmap(workouts: &[Workout], now: DateTime<Utc>) -> Vec<HeatmapEntry> {
    let cutoff = now - Duration::days(HEATMAP_DAYS);
    let mut volumes: HashMap<&str, f64> = HashMap::new();

    for workout in workouts {
        if workout.date < cutoff {
            break;
        }
        for exercise in &workout.exercises {
            *volumes.entry(exercise.muscle_group.as_str()).or_insert(0.0) += raw_set_volume(exercise);
        }
    }

    let max_volume = volumes.values().copied().fold(1.0, f64::max);

    let mut entries: Vec<HeatmapEntry> = volumes
        .into_iter()
        .filter(|(_, volume)| *volume > 0.0)
        .map(|(muscle, volume)| HeatmapEntry {
            muscle: muscle.to_string(),
            volume,
            intensity: volume / max_volume * 100.0,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.intensity
            .total_cmp(&a.intensity)
            .then_with(|| a.muscle.cmp(&b.muscle))
    });
    entries
}
