use crate::error::{Result, WorkoutError};
use crate::types::{Coordinates, KindInput, NewWorkout, Workout, WorkoutDetails, WorkoutId, WorkoutKind};
use chrono::{DateTime, Local, TimeZone, Utc};

/// Create a running workout stamped with a fresh id and the current time.
///
/// Fails with `InvalidInput` unless distance, duration and cadence are all
/// finite and positive.
pub fn create_running(
    coords: Coordinates,
    distance_km: f64,
    duration_min: f64,
    cadence_spm: u32,
) -> Result<Workout> {
    running_at(
        WorkoutId::generate(),
        Utc::now(),
        coords,
        distance_km,
        duration_min,
        cadence_spm,
    )
}

/// Create a cycling workout stamped with a fresh id and the current time.
///
/// Elevation gain may be zero but not negative.
pub fn create_cycling(
    coords: Coordinates,
    distance_km: f64,
    duration_min: f64,
    elevation_gain_m: f64,
) -> Result<Workout> {
    cycling_at(
        WorkoutId::generate(),
        Utc::now(),
        coords,
        distance_km,
        duration_min,
        elevation_gain_m,
    )
}

pub fn create(input: NewWorkout) -> Result<Workout> {
    match input.extra {
        KindInput::Running { cadence_spm } => create_running(
            input.coords,
            input.distance_km,
            input.duration_min,
            cadence_spm,
        ),
        KindInput::Cycling { elevation_gain_m } => create_cycling(
            input.coords,
            input.distance_km,
            input.duration_min,
            elevation_gain_m,
        ),
    }
}

pub(crate) fn running_at(
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: Coordinates,
    distance_km: f64,
    duration_min: f64,
    cadence_spm: u32,
) -> Result<Workout> {
    let distance_km = positive("distance", distance_km)?;
    let duration_min = positive("duration", duration_min)?;
    if cadence_spm == 0 {
        return Err(WorkoutError::InvalidInput {
            field: "cadence",
            value: 0.0,
            expected: "positive",
        });
    }

    Ok(Workout {
        id,
        created_at,
        coords,
        distance_km,
        duration_min,
        description: describe(WorkoutKind::Running, created_at),
        interaction_count: 0,
        details: WorkoutDetails::Running {
            cadence_spm,
            pace_min_per_km: pace(distance_km, duration_min),
        },
    })
}

pub(crate) fn cycling_at(
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: Coordinates,
    distance_km: f64,
    duration_min: f64,
    elevation_gain_m: f64,
) -> Result<Workout> {
    let distance_km = positive("distance", distance_km)?;
    let duration_min = positive("duration", duration_min)?;
    let elevation_gain_m = non_negative("elevation gain", elevation_gain_m)?;

    Ok(Workout {
        id,
        created_at,
        coords,
        distance_km,
        duration_min,
        description: describe(WorkoutKind::Cycling, created_at),
        interaction_count: 0,
        details: WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_km_per_hour: speed(distance_km, duration_min),
        },
    })
}

/// min/km
pub fn pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// km/h
pub fn speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// `"{Kind} on {Month} {day}"`, e.g. `"Running on April 14"`, using the
/// local calendar date of `created_at`.
pub fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    describe_in(kind, created_at, &Local)
}

/// Same as [`describe`] with the calendar date taken in `tz`.
pub fn describe_in<Tz>(kind: WorkoutKind, created_at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} on {}",
        capitalize(kind.as_str()),
        created_at.with_timezone(tz).format("%B %-d")
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

impl Workout {
    /// Count a selection of this workout. Returns the new count.
    pub fn record_interaction(&mut self) -> u32 {
        self.interaction_count = self.interaction_count.saturating_add(1);
        self.interaction_count
    }

    pub(crate) fn with_interaction_count(mut self, count: u32) -> Self {
        self.interaction_count = count;
        self
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WorkoutError::InvalidInput {
            field,
            value,
            expected: "positive",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        // -0.0 passes the check; store it as plain zero
        Ok(value + 0.0)
    } else {
        Err(WorkoutError::InvalidInput {
            field,
            value,
            expected: "non-negative",
        })
    }
}
