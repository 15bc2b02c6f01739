//! History projection: every recorded set for one exercise, newest date first.
//!
//! The projection refreshes wholesale and atomically; readers never observe a
//! half-applied refresh. It also tracks staleness: any set mutation marks the
//! history stale so a consumer knows its copy no longer reflects the store.

use crate::request::{LoadOutcome, RequestSeq, RequestToken};
use crate::{ExerciseSet, Result};

/// Handle for one in-flight history refresh
#[derive(Debug)]
pub struct RefreshRequest {
    token: RequestToken,
}

/// Read-only copy of the projection for rendering
#[derive(Clone, Debug)]
pub struct HistorySnapshot {
    pub entries: Vec<ExerciseSet>,
    pub is_stale: bool,
}

pub struct HistoryProjection {
    exercise_id: String,
    entries: Vec<ExerciseSet>,
    stale: bool,
    seq: RequestSeq,
}

impl HistoryProjection {
    /// A fresh projection holds nothing and is stale until its first refresh
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            entries: Vec::new(),
            stale: true,
            seq: RequestSeq::new(),
        }
    }

    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }

    /// Start a wholesale refresh. Any refresh still in flight becomes stale.
    pub fn begin_refresh(&mut self) -> RefreshRequest {
        RefreshRequest {
            token: self.seq.issue(),
        }
    }

    /// Apply the result of a refresh.
    ///
    /// A request that is no longer current is discarded. A failed fetch keeps
    /// the previous entries and the staleness flag, and propagates the error.
    pub fn complete_refresh(
        &mut self,
        request: RefreshRequest,
        fetched: Result<Vec<ExerciseSet>>,
    ) -> Result<LoadOutcome> {
        if !self.seq.is_current(request.token) {
            tracing::debug!(
                exercise_id = %self.exercise_id,
                "Discarding superseded history refresh"
            );
            return Ok(LoadOutcome::Superseded);
        }
        self.seq.settle(request.token);

        let mut entries = fetched?;

        // Newest date first; creation order within a date (stable sort over
        // the store's creation-ordered result)
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        self.entries = entries;
        self.stale = false;

        Ok(LoadOutcome::Applied)
    }

    /// Flag the history as out of date after a set mutation.
    ///
    /// Also supersedes any refresh still in flight: its rows were fetched
    /// before the mutation, so letting it land would clear the flag with
    /// stale contents.
    pub fn mark_stale(&mut self) {
        self.stale = true;
        self.seq.supersede();
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn refreshing(&self) -> bool {
        self.seq.pending()
    }

    pub fn entries(&self) -> &[ExerciseSet] {
        &self.entries
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self.entries.clone(),
            is_stale: self.stale,
        }
    }
}
