//! Weight-ordered projection of one session's set list.
//!
//! The projection mirrors the store's rows for a single exercise and date,
//! ordered heaviest first with creation order breaking ties. Wholesale loads
//! are supersedable: completing a load whose token is no longer current is a
//! silent no-op, and a failed load leaves the previous contents in place.

use crate::request::{LoadOutcome, RequestSeq, RequestToken};
use crate::{ExerciseSet, Result, SessionScope};
use std::cmp::Ordering;
use uuid::Uuid;

/// One projected row: the set plus its creation rank within the session.
/// The rank is the row's index in the store's creation-ordered result, so
/// an in-place update lands exactly where a full reload would put it.
#[derive(Clone, Debug)]
struct Row {
    set: ExerciseSet,
    rank: usize,
}

/// Heaviest first; earlier-created first among equal weights
fn display_order(a: &Row, b: &Row) -> Ordering {
    b.set
        .weight
        .total_cmp(&a.set.weight)
        .then(a.rank.cmp(&b.rank))
}

/// Handle for one in-flight wholesale load
#[derive(Debug)]
pub struct LoadRequest {
    token: RequestToken,
}

pub struct SetListProjection {
    scope: SessionScope,
    rows: Vec<Row>,
    next_rank: usize,
    highlight: Option<Uuid>,
    seq: RequestSeq,
}

impl SetListProjection {
    pub fn new(scope: SessionScope) -> Self {
        Self {
            scope,
            rows: Vec::new(),
            next_rank: 0,
            highlight: None,
            seq: RequestSeq::new(),
        }
    }

    pub fn scope(&self) -> &SessionScope {
        &self.scope
    }

    // ========================================================================
    // Load lifecycle
    // ========================================================================

    /// Start a wholesale load. Any load still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadRequest {
        LoadRequest {
            token: self.seq.issue(),
        }
    }

    /// Apply the result of a wholesale load.
    ///
    /// A request that is no longer current is discarded without touching the
    /// projection. A failed fetch settles the request, keeps the previous
    /// contents, and propagates the error.
    pub fn complete_load(
        &mut self,
        request: LoadRequest,
        fetched: Result<Vec<ExerciseSet>>,
    ) -> Result<LoadOutcome> {
        if !self.seq.is_current(request.token) {
            tracing::debug!(scope = ?self.scope, "Discarding superseded set list load");
            return Ok(LoadOutcome::Superseded);
        }
        self.seq.settle(request.token);

        let sets = fetched?;

        self.next_rank = sets.len();
        self.rows = sets
            .into_iter()
            .enumerate()
            .map(|(rank, set)| Row { set, rank })
            .collect();
        self.rows.sort_by(display_order);

        // A highlighted row may have been deleted behind our back
        if let Some(id) = self.highlight {
            if !self.contains(id) {
                self.highlight = None;
            }
        }

        Ok(LoadOutcome::Applied)
    }

    /// True while a load has been started but not settled or superseded
    pub fn loading(&self) -> bool {
        self.seq.pending()
    }

    // ========================================================================
    // Local mutations
    // ========================================================================
    // Mutations go through SelectionController, which writes the store first
    // and mirrors the change here only on success. Each one supersedes any
    // in-flight load: a snapshot fetched before the mutation must not clobber
    // what the store now holds.

    pub(crate) fn insert(&mut self, set: ExerciseSet) {
        let row = Row {
            set,
            rank: self.next_rank,
        };
        self.next_rank += 1;

        let index = self
            .rows
            .partition_point(|existing| display_order(existing, &row) == Ordering::Less);
        self.rows.insert(index, row);
        self.seq.supersede();
    }

    pub(crate) fn apply_update(&mut self, set_id: Uuid, weight: f64, reps: f64) {
        let Some(index) = self.rows.iter().position(|r| r.set.id == set_id) else {
            tracing::warn!(%set_id, "Update for a set the projection does not hold");
            return;
        };

        // Keep the original rank so the row re-sorts exactly as a reload would
        let mut row = self.rows.remove(index);
        row.set.weight = weight;
        row.set.reps = reps;

        let index = self
            .rows
            .partition_point(|existing| display_order(existing, &row) == Ordering::Less);
        self.rows.insert(index, row);
        self.seq.supersede();
    }

    pub(crate) fn remove(&mut self, set_id: Uuid) {
        self.rows.retain(|r| r.set.id != set_id);
        if self.highlight == Some(set_id) {
            self.highlight = None;
        }
        self.seq.supersede();
    }

    // ========================================================================
    // Highlight
    // ========================================================================

    pub(crate) fn set_highlight(&mut self, set_id: Uuid) {
        if self.contains(set_id) {
            self.highlight = Some(set_id);
        }
    }

    pub(crate) fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    pub fn highlighted(&self) -> Option<Uuid> {
        self.highlight
    }

    /// Position of the highlighted row in display order, if any
    pub fn highlight_index(&self) -> Option<usize> {
        self.highlight.and_then(|id| self.position_of(id))
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn at(&self, index: usize) -> Option<&ExerciseSet> {
        self.rows.get(index).map(|r| &r.set)
    }

    pub fn position_of(&self, set_id: Uuid) -> Option<usize> {
        self.rows.iter().position(|r| r.set.id == set_id)
    }

    pub fn contains(&self, set_id: Uuid) -> bool {
        self.rows.iter().any(|r| r.set.id == set_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExerciseSet> {
        self.rows.iter().map(|r| &r.set)
    }

    /// Ordered copy of the projected sets
    pub fn sets(&self) -> Vec<ExerciseSet> {
        self.iter().cloned().collect()
    }
}
