//! Infinite-scroll pagination and search over the entry list.
//!
//! `EntryFeed` owns the whole cursor — page, page size, category filter,
//! search query — as plain fields, so several independent feeds can
//! coexist and every transition is deterministic under test. Rendering
//! goes through [`FeedSink`]; the controller never touches a terminal.

use tracing::debug;

use crate::client::api::JournalApi;
use crate::client::error::ClientError;
use crate::models::{Entry, EntryQuery};

/// Where loaded entries (and load failures) are rendered.
pub trait FeedSink {
    /// A page of entries arrived, already in display order.
    fn entries_appended(&mut self, entries: &[Entry]);
    /// The displayed list was reset (filter or search changed).
    fn cleared(&mut self);
    /// A load failed; the feed stays usable and may be retried.
    fn load_failed(&mut self, message: &str);
}

/// What a `load_more` call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Appended this many entries; the page counter advanced.
    Loaded(usize),
    /// Dropped: a load was already in flight, or the last page was reached.
    Skipped,
    /// The server returned an empty page; the feed is exhausted.
    EndReached,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EntryFeed — pagination/search state machine
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct EntryFeed {
    page: u32,
    per_page: u32,
    category: Option<String>,
    search: String,
    has_more: bool,
    in_flight: bool,
}

impl EntryFeed {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            category: None,
            search: String::new(),
            has_more: true,
            in_flight: false,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Active search term (empty when no search is applied).
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Change the category filter. Takes effect on the next
    /// `reset_and_reload`; `None` means all categories.
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.trim().is_empty());
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.trim().to_string();
    }

    fn query(&self) -> EntryQuery {
        EntryQuery {
            page: self.page,
            per_page: self.per_page,
            category: self.category.clone(),
            search: if self.search.is_empty() {
                None
            } else {
                Some(self.search.clone())
            },
        }
    }

    /// Fetch the next page, if any.
    ///
    /// At most one network call is ever outstanding: calls made while one
    /// is in flight are dropped (`Skipped`), not queued. Once a page comes
    /// back short or empty, `has_more` stays false until a reset — no
    /// later call reopens it. On failure the cursor is left untouched so
    /// the user can simply retry.
    pub async fn load_more(
        &mut self,
        api: &dyn JournalApi,
        sink: &mut dyn FeedSink,
    ) -> Result<LoadOutcome, ClientError> {
        if self.in_flight || !self.has_more {
            return Ok(LoadOutcome::Skipped);
        }

        self.in_flight = true;
        let query = self.query();
        debug!(page = query.page, "loading entries page");
        let result = api.entries(&query).await;
        self.in_flight = false;

        let entries = match result {
            Ok(entries) => entries,
            Err(err) => {
                sink.load_failed(&err.to_string());
                return Err(err);
            }
        };

        if entries.is_empty() {
            self.has_more = false;
            return Ok(LoadOutcome::EndReached);
        }

        if (entries.len() as u32) < self.per_page {
            // Last page reached; nothing left behind it.
            self.has_more = false;
        }

        sink.entries_appended(&entries);
        self.page += 1;
        Ok(LoadOutcome::Loaded(entries.len()))
    }

    /// Clear the display, rewind to page 1, and load the first page of
    /// the current filter state. Triggered by category or (debounced)
    /// search changes.
    pub async fn reset_and_reload(
        &mut self,
        api: &dyn JournalApi,
        sink: &mut dyn FeedSink,
    ) -> Result<LoadOutcome, ClientError> {
        sink.cleared();
        self.page = 1;
        self.has_more = true;
        self.load_more(api, sink).await
    }

    #[cfg(test)]
    fn force_in_flight(&mut self) {
        self.in_flight = true;
    }
}
