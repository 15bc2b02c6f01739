//! JSONL-backed RecordStore adapter.
//!
//! Each table lives in its own JSON Lines file under the store directory,
//! guarded by advisory file locks. Malformed lines are skipped with a
//! warning so one bad row cannot take the whole table down. Infrastructure
//! failures surface as `Error::StoreUnavailable` so callers know the state
//! they already hold is still good.

use crate::{Category, Error, Exercise, ExerciseSet, RecordStore, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

const CATEGORIES_FILE: &str = "categories.jsonl";
const EXERCISES_FILE: &str = "exercises.jsonl";
const SETS_FILE: &str = "sets.jsonl";

/// File-backed store rooted at a single directory
pub struct JsonlStore {
    dir: PathBuf,
}

impl JsonlStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::StoreUnavailable(format!("create store dir {:?}: {}", dir, e)))?;
        Ok(Self { dir })
    }

    fn table_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Seed path, outside the RecordStore contract
    pub fn insert_category(&self, category: &Category) -> Result<()> {
        append_row(&self.table_path(CATEGORIES_FILE), category)
    }

    /// Seed path, outside the RecordStore contract
    pub fn insert_exercise(&self, exercise: &Exercise) -> Result<()> {
        append_row(&self.table_path(EXERCISES_FILE), exercise)
    }

    pub fn is_empty(&self) -> Result<bool> {
        let categories: Vec<Category> = read_table(&self.table_path(CATEGORIES_FILE))?;
        let exercises: Vec<Exercise> = read_table(&self.table_path(EXERCISES_FILE))?;
        let sets: Vec<ExerciseSet> = read_table(&self.table_path(SETS_FILE))?;
        Ok(categories.is_empty() && exercises.is_empty() && sets.is_empty())
    }

    fn read_sets(&self) -> Result<Vec<ExerciseSet>> {
        read_table(&self.table_path(SETS_FILE))
    }

    /// Rewrite the sets table atomically: temp file, sync, rename over
    fn rewrite_sets(&self, sets: &[ExerciseSet]) -> Result<()> {
        let temp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| Error::StoreUnavailable(format!("create temp table: {}", e)))?;

        temp.as_file()
            .lock_exclusive()
            .map_err(|e| Error::StoreUnavailable(format!("lock temp table: {}", e)))?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            for set in sets {
                let line = serde_json::to_string(set)
                    .map_err(|e| Error::StoreUnavailable(format!("encode set row: {}", e)))?;
                writer
                    .write_all(line.as_bytes())
                    .and_then(|_| writer.write_all(b"\n"))
                    .map_err(|e| Error::StoreUnavailable(format!("write temp table: {}", e)))?;
            }
            writer
                .flush()
                .map_err(|e| Error::StoreUnavailable(format!("flush temp table: {}", e)))?;
        }

        temp.as_file()
            .sync_all()
            .map_err(|e| Error::StoreUnavailable(format!("sync temp table: {}", e)))?;
        temp.as_file()
            .unlock()
            .map_err(|e| Error::StoreUnavailable(format!("unlock temp table: {}", e)))?;

        // Atomically replace the old table
        temp.persist(self.table_path(SETS_FILE))
            .map_err(|e| Error::StoreUnavailable(format!("replace sets table: {}", e.error)))?;

        Ok(())
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| Error::StoreUnavailable(format!("open {:?}: {}", path, e)))?;
    // Shared lock for reading
    file.lock_shared()
        .map_err(|e| Error::StoreUnavailable(format!("lock {:?}: {}", path, e)))?;

    let reader = BufReader::new(&file);
    let mut rows = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result
            .map_err(|e| Error::StoreUnavailable(format!("read {:?}: {}", path, e)))?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(row) => rows.push(row),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse row in {:?} at line {}: {}",
                    path,
                    line_num + 1,
                    e
                );
                // Continue reading, don't fail completely
            }
        }
    }

    file.unlock()
        .map_err(|e| Error::StoreUnavailable(format!("unlock {:?}: {}", path, e)))?;
    Ok(rows)
}

fn append_row<T: Serialize>(path: &Path, row: &T) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::StoreUnavailable(format!("open {:?}: {}", path, e)))?;

    // Exclusive lock while appending
    file.lock_exclusive()
        .map_err(|e| Error::StoreUnavailable(format!("lock {:?}: {}", path, e)))?;

    {
        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(row)
            .map_err(|e| Error::StoreUnavailable(format!("encode row: {}", e)))?;
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush())
            .map_err(|e| Error::StoreUnavailable(format!("append to {:?}: {}", path, e)))?;
    }

    file.unlock()
        .map_err(|e| Error::StoreUnavailable(format!("unlock {:?}: {}", path, e)))?;
    Ok(())
}

#[async_trait::async_trait]
impl RecordStore for JsonlStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        read_table(&self.table_path(CATEGORIES_FILE))
    }

    async fn list_exercises(&self, category_id: &str) -> Result<Vec<Exercise>> {
        let exercises: Vec<Exercise> = read_table(&self.table_path(EXERCISES_FILE))?;
        Ok(exercises
            .into_iter()
            .filter(|e| e.category_id == category_id)
            .collect())
    }

    async fn list_sets(&self, exercise_id: &str, date: NaiveDate) -> Result<Vec<ExerciseSet>> {
        Ok(self
            .read_sets()?
            .into_iter()
            .filter(|s| s.exercise_id == exercise_id && s.date == date)
            .collect())
    }

    async fn list_all_sets(&self, exercise_id: &str) -> Result<Vec<ExerciseSet>> {
        Ok(self
            .read_sets()?
            .into_iter()
            .filter(|s| s.exercise_id == exercise_id)
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
        append_row(&self.table_path(SETS_FILE), &set)?;
        tracing::debug!(set_id = %set.id, "Appended set to store");
        Ok(set)
    }

    async fn update_set(&self, set_id: Uuid, weight: f64, reps: f64) -> Result<()> {
        let mut sets = self.read_sets()?;
        let set = sets
            .iter_mut()
            .find(|s| s.id == set_id)
            .ok_or_else(|| Error::NotFound(format!("set {set_id}")))?;
        set.weight = weight;
        set.reps = reps;
        self.rewrite_sets(&sets)
    }

    async fn delete_set(&self, set_id: Uuid) -> Result<()> {
        let mut sets = self.read_sets()?;
        let index = sets
            .iter()
            .position(|s| s.id == set_id)
            .ok_or_else(|| Error::NotFound(format!("set {set_id}")))?;
        sets.remove(index);
        self.rewrite_sets(&sets)
    }
}
