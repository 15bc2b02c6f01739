//! Staged drill-down from category list to an editable session.
//!
//! The navigator walks category -> exercise -> session for one date. Each
//! stage's rows load asynchronously with at most one load live per stage;
//! choosing again while a load is in flight supersedes it, so the last
//! request always wins. `back` discards deeper state and abandons whatever
//! that stage still had in flight.

use crate::request::{LoadOutcome, RequestSeq, RequestToken};
use crate::store::RecordStore;
use crate::{Category, Error, Exercise, Result, SessionScope};
use chrono::NaiveDate;
use std::sync::Arc;

/// Where the drill-down currently stands
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavState {
    AwaitingCategory,
    AwaitingExercise { category: Category },
    SessionReady { category: Category, exercise: Exercise },
}

/// Handle for one in-flight category list load
#[derive(Debug)]
pub struct CategoryLoad {
    token: RequestToken,
}

/// Handle for one in-flight exercise list load
#[derive(Debug)]
pub struct ExerciseLoad {
    token: RequestToken,
    category_id: String,
}

pub struct DrillDownNavigator {
    store: Arc<dyn RecordStore>,
    date: NaiveDate,
    state: NavState,
    categories: Vec<Category>,
    exercises: Vec<Exercise>,
    category_seq: RequestSeq,
    exercise_seq: RequestSeq,
}

impl DrillDownNavigator {
    pub fn new(store: Arc<dyn RecordStore>, date: NaiveDate) -> Self {
        Self {
            store,
            date,
            state: NavState::AwaitingCategory,
            categories: Vec::new(),
            exercises: Vec::new(),
            category_seq: RequestSeq::new(),
            exercise_seq: RequestSeq::new(),
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Exercise rows for the chosen category. Kept cached through
    /// `SessionReady` so backing out needs no refetch.
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn loading_categories(&self) -> bool {
        self.category_seq.pending()
    }

    pub fn loading_exercises(&self) -> bool {
        self.exercise_seq.pending()
    }

    // ========================================================================
    // Category stage
    // ========================================================================

    pub fn begin_category_load(&mut self) -> CategoryLoad {
        CategoryLoad {
            token: self.category_seq.issue(),
        }
    }

    pub fn complete_category_load(
        &mut self,
        request: CategoryLoad,
        fetched: Result<Vec<Category>>,
    ) -> Result<LoadOutcome> {
        if !self.category_seq.is_current(request.token) {
            tracing::debug!("Discarding superseded category load");
            return Ok(LoadOutcome::Superseded);
        }
        self.category_seq.settle(request.token);

        self.categories = fetched?;
        Ok(LoadOutcome::Applied)
    }

    /// Fetch and apply the category list in one step
    pub async fn load_categories(&mut self) -> Result<LoadOutcome> {
        let request = self.begin_category_load();
        let fetched = self.store.list_categories().await;
        self.complete_category_load(request, fetched)
    }

    // ========================================================================
    // Exercise stage
    // ========================================================================

    /// Drill into a category and start loading its exercises.
    ///
    /// Choosing a different category while a previous load is still in
    /// flight supersedes that load. Illegal once a session is ready.
    pub fn choose_category(&mut self, category_id: &str) -> Result<ExerciseLoad> {
        if matches!(self.state, NavState::SessionReady { .. }) {
            return Err(Error::InvalidState(
                "cannot choose a category while a session is open".into(),
            ));
        }

        let category = self
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .cloned()
            .ok_or_else(|| {
                Error::InvalidState(format!("unknown category '{category_id}'"))
            })?;

        // Rows from any previously chosen category are no longer ours
        self.exercises.clear();
        self.state = NavState::AwaitingExercise { category };

        Ok(ExerciseLoad {
            token: self.exercise_seq.issue(),
            category_id: category_id.to_string(),
        })
    }

    pub fn complete_exercise_load(
        &mut self,
        request: ExerciseLoad,
        fetched: Result<Vec<Exercise>>,
    ) -> Result<LoadOutcome> {
        if !self.exercise_seq.is_current(request.token) {
            tracing::debug!(
                category_id = %request.category_id,
                "Discarding superseded exercise load"
            );
            return Ok(LoadOutcome::Superseded);
        }
        self.exercise_seq.settle(request.token);

        self.exercises = fetched?;
        Ok(LoadOutcome::Applied)
    }

    /// Drill into a category and fetch its exercises in one step
    pub async fn choose_category_and_load(&mut self, category_id: &str) -> Result<LoadOutcome> {
        let request = self.choose_category(category_id)?;
        let fetched = self.store.list_exercises(&request.category_id).await;
        self.complete_exercise_load(request, fetched)
    }

    // ========================================================================
    // Session stage
    // ========================================================================

    /// Pick an exercise from the loaded list, yielding the session scope
    pub fn choose_exercise(&mut self, exercise_id: &str) -> Result<SessionScope> {
        let category = match &self.state {
            NavState::AwaitingExercise { category } => category.clone(),
            _ => {
                return Err(Error::InvalidState(
                    "no category chosen to pick an exercise from".into(),
                ))
            }
        };

        let exercise = self
            .exercises
            .iter()
            .find(|e| e.id == exercise_id)
            .cloned()
            .ok_or_else(|| {
                Error::InvalidState(format!("unknown exercise '{exercise_id}'"))
            })?;

        let scope = SessionScope {
            exercise_id: exercise.id.clone(),
            date: self.date,
        };
        self.state = NavState::SessionReady { category, exercise };
        Ok(scope)
    }

    /// Step one stage back toward the category list.
    ///
    /// Returns false when already at the root. Backing out of the exercise
    /// stage abandons any exercise load still in flight.
    pub fn back(&mut self) -> bool {
        match std::mem::replace(&mut self.state, NavState::AwaitingCategory) {
            NavState::SessionReady { category, .. } => {
                // Cached exercise rows stay valid for this category
                self.state = NavState::AwaitingExercise { category };
                true
            }
            NavState::AwaitingExercise { .. } => {
                self.exercises.clear();
                self.exercise_seq.supersede();
                true
            }
            NavState::AwaitingCategory => false,
        }
    }
}
