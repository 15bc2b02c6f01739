//! Default catalog of workout categories and exercises.
//!
//! This module provides the built-in categories and exercises used to seed
//! a fresh store.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with built-in categories and exercises
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
    }
}

fn exercise(id: &str, category_id: &str, name: &str) -> Exercise {
    Exercise {
        id: id.into(),
        category_id: category_id.into(),
        name: name.into(),
    }
}

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> Catalog {
    // Order here is the order shown in every category and exercise list.
    let categories = vec![
        category("chest", "Chest"),
        category("back", "Back"),
        category("legs", "Legs"),
        category("shoulders", "Shoulders"),
        category("arms", "Arms"),
        category("core", "Core"),
    ];

    let exercises = vec![
        // ====================================================================
        // Chest
        // ====================================================================
        exercise("bench_press", "chest", "Barbell Bench Press"),
        exercise("incline_db_press", "chest", "Incline Dumbbell Press"),
        exercise("cable_fly", "chest", "Cable Fly"),
        // ====================================================================
        // Back
        // ====================================================================
        exercise("deadlift", "back", "Deadlift"),
        exercise("barbell_row", "back", "Barbell Row"),
        exercise("lat_pulldown", "back", "Lat Pulldown"),
        exercise("pullup", "back", "Pull-up"),
        // ====================================================================
        // Legs
        // ====================================================================
        exercise("squat", "legs", "Barbell Back Squat"),
        exercise("leg_press", "legs", "Leg Press"),
        exercise("romanian_deadlift", "legs", "Romanian Deadlift"),
        exercise("calf_raise", "legs", "Standing Calf Raise"),
        // ====================================================================
        // Shoulders
        // ====================================================================
        exercise("overhead_press", "shoulders", "Overhead Press"),
        exercise("lateral_raise", "shoulders", "Dumbbell Lateral Raise"),
        exercise("face_pull", "shoulders", "Face Pull"),
        // ====================================================================
        // Arms
        // ====================================================================
        exercise("barbell_curl", "arms", "Barbell Curl"),
        exercise("tricep_pushdown", "arms", "Tricep Pushdown"),
        exercise("hammer_curl", "arms", "Hammer Curl"),
        // ====================================================================
        // Core
        // ====================================================================
        exercise("plank", "core", "Weighted Plank"),
        exercise("cable_crunch", "core", "Cable Crunch"),
    ];

    Catalog {
        categories,
        exercises,
    }
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if category.id.is_empty() {
                errors.push("Category has empty ID".to_string());
            }
            if category.name.is_empty() {
                errors.push(format!("Category '{}' has empty name", category.id));
            }
            if !category_ids.insert(category.id.as_str()) {
                errors.push(format!("Duplicate category ID '{}'", category.id));
            }
        }

        let mut exercise_ids = HashSet::new();
        for exercise in &self.exercises {
            if exercise.id.is_empty() {
                errors.push("Exercise has empty ID".to_string());
            }
            if exercise.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", exercise.id));
            }
            if !exercise_ids.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise ID '{}'", exercise.id));
            }

            // Check that the referenced category exists
            if !category_ids.contains(exercise.category_id.as_str()) {
                errors.push(format!(
                    "Exercise '{}' references non-existent category '{}'",
                    exercise.id, exercise.category_id
                ));
            }
        }

        // Every category should offer something to drill into
        for category in &self.categories {
            if !self.exercises.iter().any(|e| e.category_id == category.id) {
                errors.push(format!("Category '{}' has no exercises", category.id));
            }
        }

        errors
    }
}
