//! CSV export of an exercise's full set history.

use crate::{RecordStore, Result};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    weight: f64,
    reps: f64,
    set_id: String,
}

impl From<&crate::ExerciseSet> for CsvRow {
    fn from(set: &crate::ExerciseSet) -> Self {
        CsvRow {
            date: set.date.to_string(),
            weight: set.weight,
            reps: set.reps,
            set_id: set.id.to_string(),
        }
    }
}

/// Export every recorded set for an exercise, newest date first
///
/// Rewrites `out` wholesale and returns the number of rows written.
pub async fn export_exercise_csv(
    store: &dyn RecordStore,
    exercise_id: &str,
    out: &Path,
) -> Result<usize> {
    let mut sets = store.list_all_sets(exercise_id).await?;
    sets.sort_by(|a, b| b.date.cmp(&a.date));

    // Ensure parent directory exists
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(out)?;
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);

    for set in &sets {
        writer.serialize(CsvRow::from(set))?;
    }

    // Flush and sync to disk
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!(exercise_id, rows = sets.len(), "Exported sets to {:?}", out);
    Ok(sets.len())
}
