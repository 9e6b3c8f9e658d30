use crate::types::{Coordinates, KindInput, NewWorkout};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pacemap",
    about = "Log running and cycling workouts at map coordinates"
)]
pub struct Cli {
    /// SQLite file holding the saved workouts.
    ///
    /// Default: <data dir>/pacemap/pacemap.sqlite3
    #[arg(long, env = "PACEMAP_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Record a workout at a map location
    #[command(subcommand)]
    Add(AddCmd),

    /// Print every workout as a marker label and a summary card
    List,

    /// Select a workout: count the interaction and show where the map centers
    Show {
        /// Workout id as printed by `list`
        id: String,
    },

    /// Append workouts from a JSON export (including a browser local-storage dump)
    Import {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Print all workouts as JSON
    Export,

    /// Delete every saved workout
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum AddCmd {
    /// A run; pace is derived from distance and duration
    Running {
        #[command(flatten)]
        common: CommonArgs,

        /// Steps per minute
        #[arg(long)]
        cadence: u32,
    },
    /// A ride; speed is derived from distance and duration
    Cycling {
        #[command(flatten)]
        common: CommonArgs,

        /// Elevation gain in meters
        #[arg(long, allow_hyphen_values = true)]
        elevation: f64,
    },
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Map location as LAT,LNG
    #[arg(long, value_name = "LAT,LNG", value_parser = parse_coordinates, allow_hyphen_values = true)]
    pub at: Coordinates,

    /// Distance in km
    #[arg(long, allow_hyphen_values = true)]
    pub distance: f64,

    /// Duration in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub duration: f64,
}

impl AddCmd {
    pub fn into_input(self) -> NewWorkout {
        let (common, extra) = match self {
            Self::Running { common, cadence } => (
                common,
                KindInput::Running {
                    cadence_spm: cadence,
                },
            ),
            Self::Cycling { common, elevation } => (
                common,
                KindInput::Cycling {
                    elevation_gain_m: elevation,
                },
            ),
        };
        NewWorkout {
            coords: common.at,
            distance_km: common.distance,
            duration_min: common.duration,
            extra,
        }
    }
}

fn parse_coordinates(s: &str) -> Result<Coordinates, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {s:?}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude {lng:?}: {e}"))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} is outside [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude {lng} is outside [-180, 180]"));
    }
    Ok(Coordinates::new(lat, lng))
}
