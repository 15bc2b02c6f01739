//! RecordStore port and the in-memory adapter.
//!
//! The store is the only suspending boundary in the system: every method is
//! async and may fail with `Error::StoreUnavailable`. List results come back
//! in creation order; the projections rely on that order for their sort
//! tie-breaks.

use crate::{Category, Error, Exercise, ExerciseSet, Result};
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Durable storage of categories, exercises, and recorded sets
///
/// Category and Exercise rows are read-only through this trait; their
/// lifecycle belongs to whoever provisions the store (see the adapters'
/// seed methods). Set rows are created, rewritten, and deleted here.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Exercises belonging to one category, in creation order
    async fn list_exercises(&self, category_id: &str) -> Result<Vec<Exercise>>;

    /// Sets for one exercise on one date (date-exact), in creation order
    async fn list_sets(&self, exercise_id: &str, date: NaiveDate) -> Result<Vec<ExerciseSet>>;

    /// Every set for an exercise across all dates, in creation order
    async fn list_all_sets(&self, exercise_id: &str) -> Result<Vec<ExerciseSet>>;

    /// Persist a new set and return it with its minted id
    async fn insert_set(
        &self,
        exercise_id: &str,
        date: NaiveDate,
        weight: f64,
        reps: f64,
    ) -> Result<ExerciseSet>;

    /// Rewrite the measurements of an existing set
    async fn update_set(&self, set_id: Uuid, weight: f64, reps: f64) -> Result<()>;

    async fn delete_set(&self, set_id: Uuid) -> Result<()>;
}

/// In-memory store adapter
///
/// Tables live behind an RwLock and keep their creation order. Used by unit
/// tests and demo wiring; the CLI persists through `JsonlStore`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    exercises: Vec<Exercise>,
    sets: Vec<ExerciseSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed path, outside the RecordStore contract: category lifecycle is
    /// not the core's to manage.
    pub async fn insert_category(&self, category: Category) {
        self.tables.write().await.categories.push(category);
    }

    /// Seed path, outside the RecordStore contract
    pub async fn insert_exercise(&self, exercise: Exercise) {
        self.tables.write().await.exercises.push(exercise);
    }

    pub async fn is_empty(&self) -> bool {
        let tables = self.tables.read().await;
        tables.categories.is_empty() && tables.exercises.is_empty() && tables.sets.is_empty()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.tables.read().await.categories.clone())
    }

    async fn list_exercises(&self, category_id: &str) -> Result<Vec<Exercise>> {
        Ok(self
            .tables
            .read()
            .await
            .exercises
            .iter()
            .filter(|e| e.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn list_sets(&self, exercise_id: &str, date: NaiveDate) -> Result<Vec<ExerciseSet>> {
        Ok(self
            .tables
            .read()
            .await
            .sets
            .iter()
            .filter(|s| s.exercise_id == exercise_id && s.date == date)
            .cloned()
            .collect())
    }

    async fn list_all_sets(&self, exercise_id: &str) -> Result<Vec<ExerciseSet>> {
        Ok(self
            .tables
            .read()
            .await
            .sets
            .iter()
            .filter(|s| s.exercise_id == exercise_id)
            .cloned()
            .collect())
    }

    async fn insert_set(
        &self,
        exercise_id: &str,
        date: NaiveDate,
        weight: f64,
        reps: f64,
    ) -> Result<ExerciseSet> {
        let set = ExerciseSet {
            id: Uuid::new_v4(),
            exercise_id: exercise_id.to_string(),
            date,
            weight,
            reps,
        };
        self.tables.write().await.sets.push(set.clone());
        tracing::debug!(set_id = %set.id, exercise_id, "inserted set");
        Ok(set)
    }

    async fn update_set(&self, set_id: Uuid, weight: f64, reps: f64) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.sets.iter_mut().find(|s| s.id == set_id) {
            Some(set) => {
                set.weight = weight;
                set.reps = reps;
                Ok(())
            }
            None => Err(Error::NotFound(format!("set {set_id}"))),
        }
    }

    async fn delete_set(&self, set_id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.sets.iter().position(|s| s.id == set_id) {
            Some(index) => {
                tables.sets.remove(index);
                Ok(())
            }
            None => Err(Error::NotFound(format!("set {set_id}"))),
        }
    }
}
