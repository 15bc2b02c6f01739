#![forbid(unsafe_code)]

//! Core domain model and session logic for the Setlog workout tracker.
//!
//! This crate provides:
//! - Domain types (categories, exercises, recorded sets)
//! - The RecordStore port with in-memory and JSONL adapters
//! - Selection-driven set editing and the session projections
//! - Drill-down navigation and date paging
//! - Catalog management and CSV export

pub mod types;
pub mod error;
pub mod request;
pub mod store;
pub mod jsonl_store;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod set_list;
pub mod history;
pub mod selection;
pub mod navigator;
pub mod paging;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use request::{LoadOutcome, RequestToken};
pub use store::{MemoryStore, RecordStore};
pub use jsonl_store::JsonlStore;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use set_list::SetListProjection;
pub use history::{HistoryProjection, HistorySnapshot};
pub use selection::{EditorSnapshot, SelectionController};
pub use navigator::{DrillDownNavigator, NavState};
pub use paging::{date_pager, offset_for_date, page_date, PagedContainer, PAGE_COUNT, STARTING_PAGE};
pub use export::export_exercise_csv;
