//! Fixed-width strip of lazily built pages.
//!
//! The tracker shows one session per calendar day on a swipeable strip of
//! pages centered on today. Page identity is a pure function of the offset,
//! so revisiting an offset always means the same day. Page state is built on
//! first visit and evicted once the visitor moves outside the retain window.

use crate::{Error, Result};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Total pages on the strip
pub const PAGE_COUNT: usize = 10_000;

/// Offset of today's page, leaving roughly equal room in both directions
pub const STARTING_PAGE: usize = 5_000;

/// The date a page offset stands for, relative to `today`.
///
/// Pure: the same offset always yields the same date. None when the offset
/// is off the strip.
pub fn page_date(today: NaiveDate, offset: usize) -> Option<NaiveDate> {
    if offset >= PAGE_COUNT {
        return None;
    }
    let delta = offset as i64 - STARTING_PAGE as i64;
    today.checked_add_signed(Duration::days(delta))
}

/// Inverse of `page_date`: the offset showing `date`, if it is on the strip
pub fn offset_for_date(today: NaiveDate, date: NaiveDate) -> Option<usize> {
    let offset = (date - today).num_days() + STARTING_PAGE as i64;
    if (0..PAGE_COUNT as i64).contains(&offset) {
        Some(offset as usize)
    } else {
        None
    }
}

/// Lazily built pages with window eviction
pub struct PagedContainer<P, F>
where
    F: Fn(usize) -> P,
{
    page_count: usize,
    build: F,
    retain_radius: usize,
    live: BTreeMap<usize, P>,
}

impl<P, F> PagedContainer<P, F>
where
    F: Fn(usize) -> P,
{
    /// Container keeping one page either side of the visited one
    pub fn new(page_count: usize, build: F) -> Self {
        Self::with_retain(page_count, 1, build)
    }

    pub fn with_retain(page_count: usize, retain_radius: usize, build: F) -> Self {
        Self {
            page_count,
            build,
            retain_radius,
            live: BTreeMap::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Move the visitor to `offset`, building the page if it is not live.
    ///
    /// Pages outside the retain window around `offset` are dropped; a later
    /// visit rebuilds them from scratch.
    pub fn visit(&mut self, offset: usize) -> Result<&mut P> {
        if offset >= self.page_count {
            return Err(Error::InvalidState(format!(
                "page offset {offset} out of range (strip has {} pages)",
                self.page_count
            )));
        }

        let radius = self.retain_radius;
        self.live.retain(|&held, _| held.abs_diff(offset) <= radius);

        Ok(self
            .live
            .entry(offset)
            .or_insert_with(|| (self.build)(offset)))
    }

    /// Peek at a live page without building or evicting anything
    pub fn get(&self, offset: usize) -> Option<&P> {
        self.live.get(&offset)
    }

    /// Offsets currently holding built pages, in order
    pub fn live_offsets(&self) -> Vec<usize> {
        self.live.keys().copied().collect()
    }
}

/// The standard strip: one date per page, today at the starting offset
pub fn date_pager(today: NaiveDate) -> PagedContainer<NaiveDate, impl Fn(usize) -> NaiveDate> {
    PagedContainer::new(PAGE_COUNT, move |offset| {
        // visit() guards the range, so the fallback never shows
        page_date(today, offset).unwrap_or(today)
    })
}
