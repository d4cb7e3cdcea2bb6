//! Backup export and import

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::KeyValueStore;
use crate::models::{CustomExercise, Workout};
use crate::store::WorkoutStore;

/// Backup format version written on export
pub const BACKUP_VERSION: u32 = 1;

/// Backup document as written on export
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup<'a> {
    pub workouts: &'a [Workout],
    pub custom_exercises: &'a [CustomExercise],
    pub custom_muscle_groups: &'a [String],
    pub version: u32,
}

/// Parsed backup ready to import
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    /// Required; `null` is rejected
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub custom_exercises: Option<Vec<CustomExercise>>,
    #[serde(default)]
    pub custom_muscle_groups: Option<Vec<String>>,
    #[serde(default)]
    pub version: Option<serde_json::Value>,
}

/// Serialize the store as a pretty-printed backup document
pub fn export<S: KeyValueStore>(store: &WorkoutStore<S>) -> Result<String> {
    let backup = Backup {
        workouts: store.workouts(),
        custom_exercises: store.custom_exercises(),
        custom_muscle_groups: store.custom_muscle_groups(),
        version: BACKUP_VERSION,
    };
    serde_json::to_string_pretty(&backup).context("failed to serialize backup")
}

pub fn parse_backup(json: &str) -> Result<BackupData> {
    serde_json::from_str(json).context("invalid backup file")
}

/// Parse and import; on error the store is left untouched
pub fn import<S: KeyValueStore>(store: &mut WorkoutStore<S>, json: &str) -> Result<usize> {
    let data = parse_backup(json)?;
    let count = data.workouts.len();
    info!("Importing backup version {:?}", data.version);

    store.import_data(
        data.workouts,
        data.custom_exercises.unwrap_or_default(),
        data.custom_muscle_groups.unwrap_or_default(),
    );
    Ok(count)
}
