//! Core domain types for the Setlog workout tracker.
//!
//! This module defines the records the store owns (categories, exercises,
//! recorded sets) and the ephemeral session types the core derives from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Store-owned records
// ============================================================================

/// An exercise grouping (e.g. "Chest", "Legs")
///
/// Immutable once created; lifecycle belongs to whoever provisions the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A trackable exercise belonging to exactly one category
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub id: String,
    pub category_id: String,
    pub name: String,
}

/// One recorded set: a (weight, reps) measurement pair for an exercise on a
/// date.
///
/// `weight` and `reps` may be rewritten by an update; `exercise_id` and
/// `date` are fixed at creation. The store owns these records; the core
/// holds transient copies for display and editing, never a second source of
/// truth.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub id: Uuid,
    pub exercise_id: String,
    pub date: NaiveDate,
    pub weight: f64,
    pub reps: f64,
}

// ============================================================================
// Session types
// ============================================================================

/// The (exercise, date) pair a tracker session is scoped to
///
/// Produced by the drill-down when an exercise is chosen, consumed when
/// opening the editor session. Discarded when the user navigates away.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionScope {
    pub exercise_id: String,
    pub date: NaiveDate,
}

// ============================================================================
// Catalog type
// ============================================================================

/// The built-in categories and exercises used to seed an empty store
#[derive(Clone, Debug)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub exercises: Vec<Exercise>,
}
