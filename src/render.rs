use crate::types::{Workout, WorkoutDetails};
use crate::utils::format_number;

/// Zoom level used when centering the map on a workout.
pub const MAP_ZOOM: u8 = 13;

/// Popup text attached to the workout's map marker.
pub fn marker_label(w: &Workout) -> String {
    format!("{}  {}", w.kind().icon(), w.description())
}

/// Multi-line summary card for the workout list.
pub fn card(w: &Workout) -> String {
    let metrics = match *w.details() {
        WorkoutDetails::Running {
            cadence_spm,
            pace_min_per_km,
        } => format!("  ⚡️ {pace_min_per_km:.1} min/km\n  🦶🏼 {cadence_spm} spm"),
        WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_km_per_hour,
        } => format!(
            "  ⚡️ {speed_km_per_hour:.1} km/h\n  ⛰ {} m",
            format_number(elevation_gain_m)
        ),
    };

    format!(
        "{}  [{}]\n  {} {} km\n  ⏱ {} min\n{metrics}",
        w.description(),
        w.id(),
        w.kind().icon(),
        format_number(w.distance_km()),
        format_number(w.duration_min()),
    )
}

/// The workout list, newest entry on top.
pub fn workout_list(workouts: &[Workout]) -> String {
    workouts
        .iter()
        .rev()
        .map(|w| format!("{}\n{}\n", marker_label(w), card(w)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where the map view moves when a workout is selected in the list.
pub fn map_view(w: &Workout) -> String {
    format!("map view: {} zoom {MAP_ZOOM}", w.coords())
}
