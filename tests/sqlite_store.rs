use pacemap::app::App;
use pacemap::database::{SqliteStorage, Storage};
use pacemap::error::WorkoutError;
use pacemap::store::{STORAGE_KEY, WorkoutStore};
use pacemap::types::{Coordinates, KindInput, NewWorkout, WorkoutKind};

fn ride(distance_km: f64, elevation_gain_m: f64) -> NewWorkout {
    NewWorkout {
        coords: Coordinates::new(51.5, -0.12),
        distance_km,
        duration_min: 60.0,
        extra: KindInput::Cycling { elevation_gain_m },
    }
}

fn run() -> NewWorkout {
    NewWorkout {
        coords: Coordinates::new(48.85, 2.35),
        distance_km: 5.2,
        duration_min: 24.0,
        extra: KindInput::Running { cadence_spm: 178 },
    }
}

#[test]
fn workouts_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("nested").join("pacemap.sqlite3");

    let ids: Vec<String> = {
        let mut app = App::start(SqliteStorage::open(&db).unwrap());
        vec![
            app.new_workout(run()).unwrap().id().to_string(),
            app.new_workout(ride(20.0, 350.0)).unwrap().id().to_string(),
        ]
    };

    let app = App::start(SqliteStorage::open(&db).unwrap());
    let loaded: Vec<String> = app.workouts().iter().map(|w| w.id().to_string()).collect();
    assert_eq!(loaded, ids);

    let first = app.find(&ids[0]).unwrap();
    assert_eq!(first.kind(), WorkoutKind::Running);
    assert_eq!(first.pace_min_per_km(), Some(24.0 / 5.2));

    let second = app.find(&ids[1]).unwrap();
    assert_eq!(second.speed_km_per_hour(), Some(20.0));
}

#[test]
fn rejected_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("pacemap.sqlite3");

    let mut app = App::start(SqliteStorage::open(&db).unwrap());
    let err = app.new_workout(ride(0.0, 10.0)).unwrap_err();
    assert!(matches!(err, WorkoutError::InvalidInput { field: "distance", .. }));

    let storage = SqliteStorage::open(&db).unwrap();
    assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);
}

#[test]
fn corrupt_blob_starts_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("pacemap.sqlite3");

    let mut storage = SqliteStorage::open(&db).unwrap();
    storage.set(STORAGE_KEY, "][ not json").unwrap();

    let mut app = App::start(storage);
    assert!(app.workouts().is_empty());
    app.new_workout(run()).unwrap();

    let store = WorkoutStore::load(SqliteStorage::open(&db).unwrap());
    assert_eq!(store.len(), 1);
}

#[test]
fn reset_removes_the_blob() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("pacemap.sqlite3");

    let mut app = App::start(SqliteStorage::open(&db).unwrap());
    app.new_workout(run()).unwrap();
    app.reset_all().unwrap();

    let store = WorkoutStore::load(SqliteStorage::open(&db).unwrap());
    assert!(store.is_empty());
    assert!(matches!(store.find_by_id("anything"), Err(WorkoutError::NotFound(_))));
}
