//! Selection-driven editing of one session's sets.
//!
//! The controller owns the session's set list and history projections plus
//! the single optional selection. Mutations write the store first and mirror
//! the change locally only on success, so a store failure leaves every piece
//! of session state exactly as it was. Mode is derived from the selection:
//! no selection means add mode, a selection means edit mode.

use crate::history::{HistoryProjection, HistorySnapshot};
use crate::request::LoadOutcome;
use crate::set_list::SetListProjection;
use crate::store::RecordStore;
use crate::{Error, ExerciseSet, Result, SessionScope};
use std::sync::Arc;
use uuid::Uuid;

/// Read-only copy of the editing state for rendering
#[derive(Clone, Debug)]
pub struct EditorSnapshot {
    pub selection_id: Option<Uuid>,
    /// Sets in display order, heaviest first
    pub sets: Vec<ExerciseSet>,
    pub highlight_index: Option<usize>,
    pub is_add_mode: bool,
}

pub struct SelectionController {
    store: Arc<dyn RecordStore>,
    sets: SetListProjection,
    history: HistoryProjection,
    selected: Option<Uuid>,
}

impl SelectionController {
    /// Session with nothing loaded yet; callers drive `reload` themselves
    pub fn new(store: Arc<dyn RecordStore>, scope: SessionScope) -> Self {
        let history = HistoryProjection::new(scope.exercise_id.clone());
        Self {
            store,
            sets: SetListProjection::new(scope),
            history,
            selected: None,
        }
    }

    /// Open a session and perform the initial set list load
    pub async fn open(store: Arc<dyn RecordStore>, scope: SessionScope) -> Result<Self> {
        let mut controller = Self::new(store, scope);
        controller.reload().await?;
        Ok(controller)
    }

    pub fn scope(&self) -> &SessionScope {
        self.sets.scope()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select a set, or clear the selection if it is already selected.
    ///
    /// Returns the resulting selection so the caller can flip between edit
    /// and add mode. Selecting a set the list does not hold is a caller
    /// error.
    pub fn select_or_toggle(&mut self, set_id: Uuid) -> Result<Option<Uuid>> {
        if !self.sets.contains(set_id) {
            return Err(Error::InvalidState(format!(
                "cannot select set {set_id}: not in the current list"
            )));
        }

        if self.selected == Some(set_id) {
            self.selected = None;
            self.sets.clear_highlight();
        } else {
            self.selected = Some(set_id);
            self.sets.set_highlight(set_id);
        }
        Ok(self.selected)
    }

    pub fn selection_id(&self) -> Option<Uuid> {
        self.selected
    }

    /// The selected row, for seeding editor fields
    pub fn selected_set(&self) -> Option<&ExerciseSet> {
        let id = self.selected?;
        self.sets.position_of(id).and_then(|index| self.sets.at(index))
    }

    /// No selection means new sets are appended; a selection means edits
    /// target the selected set
    pub fn is_add_mode(&self) -> bool {
        self.selected.is_none()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Record a new set for this session. Only legal in add mode.
    pub async fn add_set(&mut self, weight: f64, reps: f64) -> Result<ExerciseSet> {
        if self.selected.is_some() {
            return Err(Error::InvalidState(
                "cannot add while a set is selected".into(),
            ));
        }

        let scope = self.sets.scope().clone();
        let set = self
            .store
            .insert_set(&scope.exercise_id, scope.date, weight, reps)
            .await?;

        self.sets.insert(set.clone());
        self.history.mark_stale();
        tracing::debug!(set_id = %set.id, weight, reps, "Added set");
        Ok(set)
    }

    /// Rewrite the selected set's measurements, then clear the selection
    pub async fn update_set(&mut self, weight: f64, reps: f64) -> Result<()> {
        let set_id = self
            .selected
            .ok_or_else(|| Error::InvalidState("no set selected to update".into()))?;

        self.store.update_set(set_id, weight, reps).await?;

        self.sets.apply_update(set_id, weight, reps);
        self.history.mark_stale();
        self.selected = None;
        self.sets.clear_highlight();
        tracing::debug!(%set_id, weight, reps, "Updated set");
        Ok(())
    }

    /// Delete the selected set, then clear the selection
    pub async fn delete_set(&mut self) -> Result<()> {
        let set_id = self
            .selected
            .ok_or_else(|| Error::InvalidState("no set selected to delete".into()))?;

        self.store.delete_set(set_id).await?;

        self.sets.remove(set_id);
        self.selected = None;
        self.history.mark_stale();
        tracing::debug!(%set_id, "Deleted set");
        Ok(())
    }

    // ========================================================================
    // Loads
    // ========================================================================

    /// Reload the session's sets wholesale from the store.
    ///
    /// On failure the list, selection, and highlight all stay as they were.
    pub async fn reload(&mut self) -> Result<LoadOutcome> {
        let request = self.sets.begin_load();
        let scope = self.sets.scope().clone();
        let fetched = self
            .store
            .list_sets(&scope.exercise_id, scope.date)
            .await;
        let outcome = self.sets.complete_load(request, fetched)?;

        // The selected row may be gone after a reload
        if let Some(id) = self.selected {
            if !self.sets.contains(id) {
                self.selected = None;
            }
        }
        Ok(outcome)
    }

    /// Refresh the all-dates history for this session's exercise
    pub async fn refresh_history(&mut self) -> Result<LoadOutcome> {
        let request = self.history.begin_refresh();
        let exercise_id = self.history.exercise_id().to_string();
        let fetched = self.store.list_all_sets(&exercise_id).await;
        self.history.complete_refresh(request, fetched)
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    pub fn sets(&self) -> &SetListProjection {
        &self.sets
    }

    pub fn history(&self) -> &HistoryProjection {
        &self.history
    }

    pub fn editor_snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            selection_id: self.selected,
            sets: self.sets.sets(),
            highlight_index: self.sets.highlight_index(),
            is_add_mode: self.is_add_mode(),
        }
    }

    pub fn history_snapshot(&self) -> HistorySnapshot {
        self.history.snapshot()
    }
}
