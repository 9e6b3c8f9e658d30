//! The ordered, persisted collection of workouts.
//!
//! The whole collection is written as one JSON blob under [`STORAGE_KEY`].
//! Entries are rebuilt into full [`Workout`] values on load: each record is
//! validated again and its derived fields are recomputed, so a stored `pace`,
//! `speed` or `description` is never trusted. Records that cannot be rebuilt
//! are kept as raw JSON and written back after the live workouts.

use crate::database::Storage;
use crate::error::{Result, WorkoutError};
use crate::model::{cycling_at, running_at};
use crate::types::{Coordinates, Workout, WorkoutDetails, WorkoutId, WorkoutKind};
use crate::dlog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub const STORAGE_KEY: &str = "workout";

/// On-disk shape of one workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkout {
    id: String,
    date: DateTime<Utc>,
    coords: Coordinates,
    distance: f64,
    duration: f64,
    #[serde(rename = "type")]
    kind: WorkoutKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elev_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    click: u32,
}

impl From<&Workout> for StoredWorkout {
    fn from(w: &Workout) -> Self {
        let (cadence, pace, elev_gain, speed) = match *w.details() {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => (Some(f64::from(cadence_spm)), Some(pace_min_per_km), None, None),
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_hour,
            } => (None, None, Some(elevation_gain_m), Some(speed_km_per_hour)),
        };

        Self {
            id: w.id().to_string(),
            date: w.created_at(),
            coords: w.coords(),
            distance: w.distance_km(),
            duration: w.duration_min(),
            kind: w.kind(),
            cadence,
            pace,
            elev_gain,
            speed,
            description: w.description().to_string(),
            click: w.interaction_count(),
        }
    }
}

impl StoredWorkout {
    /// Rebuild the live workout, re-validating and recomputing derived fields.
    fn into_workout(self) -> Result<Workout> {
        let id = WorkoutId::from(self.id);
        let workout = match self.kind {
            WorkoutKind::Running => {
                let cadence = self.cadence.unwrap_or(f64::NAN);
                running_at(
                    id,
                    self.date,
                    self.coords,
                    self.distance,
                    self.duration,
                    whole_cadence(cadence)?,
                )?
            }
            WorkoutKind::Cycling => cycling_at(
                id,
                self.date,
                self.coords,
                self.distance,
                self.duration,
                self.elev_gain.unwrap_or(f64::NAN),
            )?,
        };
        Ok(workout.with_interaction_count(self.click))
    }
}

/// Stored cadences are plain JSON numbers; only whole values that fit a `u32` load.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_cadence(value: f64) -> Result<u32> {
    if value.is_finite() && value.fract() == 0.0 && value > 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(WorkoutError::InvalidInput {
            field: "cadence",
            value,
            expected: "positive whole",
        })
    }
}

/// Serialize the full sequence into the blob kept in storage.
pub fn serialize(workouts: &[Workout]) -> Result<String> {
    let records: Vec<StoredWorkout> = workouts.iter().map(StoredWorkout::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parse a stored blob. Absent or unparsable blobs give an empty sequence;
/// individual records that fail validation are skipped.
pub fn deserialize(blob: Option<&str>) -> Vec<Workout> {
    parse(blob).workouts
}

#[derive(Default)]
struct Parsed {
    workouts: Vec<Workout>,
    rejected: Vec<JsonValue>,
}

fn parse(blob: Option<&str>) -> Parsed {
    let mut parsed = Parsed::default();
    let Some(blob) = blob else {
        return parsed;
    };

    let records = match serde_json::from_str::<Option<Vec<JsonValue>>>(blob) {
        Ok(records) => records.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(err = %e, "stored workouts are unreadable; starting empty");
            return parsed;
        }
    };

    let total = records.len();
    for raw in records {
        match restore(&raw) {
            Ok(w) => parsed.workouts.push(w),
            Err(e) => {
                let id = raw.get("id").map_or_else(|| "?".to_string(), JsonValue::to_string);
                tracing::warn!(id = %id, err = %e, "skipping invalid stored workout");
                parsed.rejected.push(raw);
            }
        }
    }
    dlog!(
        "deserialized total={total} loaded={} rejected={}",
        parsed.workouts.len(),
        parsed.rejected.len()
    );
    parsed
}

fn restore(raw: &JsonValue) -> Result<Workout> {
    StoredWorkout::deserialize(raw)?.into_workout()
}

/// Workouts of the current session, in insertion order.
pub struct WorkoutStore<S> {
    workouts: Vec<Workout>,
    rejected: Vec<JsonValue>,
    storage: S,
}

impl<S: Storage> WorkoutStore<S> {
    /// Empty store that has not read anything from `storage`.
    pub const fn new(storage: S) -> Self {
        Self {
            workouts: Vec::new(),
            rejected: Vec::new(),
            storage,
        }
    }

    /// Populate from `storage`. An unavailable medium counts as no prior data.
    pub fn load(storage: S) -> Self {
        let blob = match storage.get(STORAGE_KEY) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!(err = %format!("{e:#}"), "storage unavailable; starting empty");
                None
            }
        };
        let Parsed { workouts, rejected } = parse(blob.as_deref());
        tracing::info!(
            count = workouts.len(),
            kept_unreadable = rejected.len(),
            "workouts loaded"
        );
        Self {
            workouts,
            rejected,
            storage,
        }
    }

    /// Add to the end. No deduplication and no reordering.
    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    pub fn find_by_id(&self, id: &str) -> Result<&Workout> {
        self.workouts
            .iter()
            .find(|w| w.id().as_str() == id)
            .ok_or_else(|| WorkoutError::NotFound(id.to_string()))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Result<&mut Workout> {
        self.workouts
            .iter_mut()
            .find(|w| w.id().as_str() == id)
            .ok_or_else(|| WorkoutError::NotFound(id.to_string()))
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Stored records that could not be rebuilt, in their original form.
    pub fn rejected(&self) -> &[JsonValue] {
        &self.rejected
    }

    /// The live workouts followed by the rejected records, untouched.
    pub fn serialize(&self) -> Result<String> {
        let mut records = self
            .workouts
            .iter()
            .map(|w| serde_json::to_value(StoredWorkout::from(w)))
            .collect::<serde_json::Result<Vec<_>>>()?;
        records.extend(self.rejected.iter().cloned());
        Ok(serde_json::to_string(&records)?)
    }

    /// Write the whole sequence to storage.
    pub fn persist(&mut self) -> Result<()> {
        let blob = self.serialize()?;
        self.storage.set(STORAGE_KEY, &blob)?;
        dlog!("persisted count={}", self.workouts.len());
        Ok(())
    }

    /// Empty the sequence and drop the persisted blob.
    pub fn clear(&mut self) -> Result<()> {
        self.workouts.clear();
        self.rejected.clear();
        self.storage.remove(STORAGE_KEY)?;
        tracing::info!("workouts cleared");
        Ok(())
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }
}
