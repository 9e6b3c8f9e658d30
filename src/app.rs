//! Application state: one store, constructed at startup and handed to every
//! handler the shell invokes.

use crate::database::Storage;
use crate::error::Result;
use crate::model;
use crate::render;
use crate::store::{self, WorkoutStore};
use crate::types::{NewWorkout, Workout};
use crate::dlog;

pub struct App<S> {
    store: WorkoutStore<S>,
}

impl<S: Storage> App<S> {
    /// Load every stored workout and announce its marker.
    pub fn start(storage: S) -> Self {
        let store = WorkoutStore::load(storage);
        for w in store.all() {
            dlog!("marker {} at {}", render::marker_label(w), w.coords());
        }
        Self { store }
    }

    /// Form submission. Nothing is stored when validation fails.
    pub fn new_workout(&mut self, input: NewWorkout) -> Result<&Workout> {
        let workout = model::create(input)?;
        tracing::info!(
            id = %workout.id(),
            kind = %workout.kind(),
            coords = %workout.coords(),
            "workout created"
        );
        self.store.append(workout);
        self.store.persist()?;
        Ok(&self.store.all()[self.store.len() - 1])
    }

    /// List click: count the interaction and return the workout so the view
    /// can center on it.
    pub fn select(&mut self, id: &str) -> Result<&Workout> {
        let count = self.store.find_by_id_mut(id)?.record_interaction();
        self.store.persist()?;
        dlog!("selected id={id} interactions={count}");
        self.store.find_by_id(id)
    }

    /// Append every valid workout found in `blob`. Returns how many were added.
    pub fn import(&mut self, blob: &str) -> Result<usize> {
        let incoming = store::deserialize(Some(blob));
        let added = incoming.len();
        for w in incoming {
            self.store.append(w);
        }
        if added > 0 {
            self.store.persist()?;
        }
        tracing::info!(added, total = self.store.len(), "workouts imported");
        Ok(added)
    }

    pub fn export(&self) -> Result<String> {
        self.store.serialize()
    }

    /// Forget everything, in memory and in storage.
    pub fn reset_all(&mut self) -> Result<()> {
        self.store.clear()
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    pub fn find(&self, id: &str) -> Result<&Workout> {
        self.store.find_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStorage;
    use crate::error::WorkoutError;
    use crate::store::STORAGE_KEY;
    use crate::types::{Coordinates, KindInput};

    fn run(distance_km: f64) -> NewWorkout {
        NewWorkout {
            coords: Coordinates::new(51.5, -0.12),
            distance_km,
            duration_min: 24.0,
            extra: KindInput::Running { cadence_spm: 178 },
        }
    }

    fn stored_blob(app: &App<MemoryStorage>) -> Option<String> {
        app.store.storage().get(STORAGE_KEY).unwrap()
    }

    #[test]
    fn new_workout_appends_and_persists() {
        let mut app = App::start(MemoryStorage::new());
        let id = app.new_workout(run(5.2)).unwrap().id().clone();

        assert_eq!(app.workouts().len(), 1);
        assert_eq!(app.find(id.as_str()).unwrap().id(), &id);
        assert!(stored_blob(&app).unwrap().contains(id.as_str()));
    }

    #[test]
    fn invalid_input_leaves_store_untouched() {
        let mut app = App::start(MemoryStorage::new());
        app.new_workout(run(5.0)).unwrap();
        let before = stored_blob(&app);

        let err = app.new_workout(run(-1.0)).unwrap_err();
        assert!(matches!(err, WorkoutError::InvalidInput { .. }));
        assert_eq!(app.workouts().len(), 1);
        assert_eq!(stored_blob(&app), before);
    }

    #[test]
    fn select_counts_and_persists_interactions() {
        let mut app = App::start(MemoryStorage::new());
        let id = app.new_workout(run(5.0)).unwrap().id().to_string();

        app.select(&id).unwrap();
        assert_eq!(app.select(&id).unwrap().interaction_count(), 2);

        let reloaded = App::start(app.store.storage().clone());
        assert_eq!(reloaded.find(&id).unwrap().interaction_count(), 2);
    }

    #[test]
    fn select_unknown_is_not_found() {
        let mut app = App::start(MemoryStorage::new());
        assert!(matches!(app.select("nope"), Err(WorkoutError::NotFound(_))));
    }

    #[test]
    fn export_then_import_into_fresh_app() {
        let mut app = App::start(MemoryStorage::new());
        app.new_workout(run(5.0)).unwrap();
        app.new_workout(run(10.0)).unwrap();
        let blob = app.export().unwrap();

        let mut other = App::start(MemoryStorage::new());
        assert_eq!(other.import(&blob).unwrap(), 2);
        assert_eq!(other.workouts(), app.workouts());
        assert_eq!(other.import("garbage").unwrap(), 0);
    }

    #[test]
    fn import_keeps_good_records_next_to_bad_ones() {
        let blob = r#"[
            {"date":"2024-04-14T09:00:00Z","id":"a","coords":[0,0],
             "distance":10,"duration":30,"type":"cycling","elevGain":0},
            {"date":"2024-04-14T09:00:00Z","id":"b","coords":[0,0],
             "distance":1,"duration":30,"type":"rowing"},
            {"date":"2024-04-15T09:00:00Z","id":"c","coords":[1,1],
             "distance":5,"duration":25,"type":"running","cadence":170}
        ]"#;
        let mut app = App::start(MemoryStorage::new());
        assert_eq!(app.import(blob).unwrap(), 2);
        let ids: Vec<_> = app.workouts().iter().map(|w| w.id().to_string()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn reset_all_clears_memory_and_storage() {
        let mut app = App::start(MemoryStorage::new());
        app.new_workout(run(5.0)).unwrap();
        app.reset_all().unwrap();
        assert!(app.workouts().is_empty());
        assert_eq!(stored_blob(&app), None);
    }
}
