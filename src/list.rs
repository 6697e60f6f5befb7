//! In-memory state behind the resource list pages.
//!
//! [`ListState`] backs the admin tables (one page of rows at a time),
//! [`FeedState`] backs the public blog feed (pages accumulate). Both keep a
//! debounced search box, a filter set, and a fetch sequence number so that a
//! slow response can never overwrite a newer one.

use std::collections::HashSet;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::dto::notice::NoticeQueue;
use crate::pagination::{Paginated, TotalCount};

/// Keystrokes settle for this long before a search is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A row that can be addressed individually inside a list.
pub trait ListRow {
    type Id: Copy + Eq + Hash;

    fn row_id(&self) -> Self::Id;
}

macro_rules! list_row_by_id {
    ($($entity:ty),+ $(,)?) => {
        $(impl ListRow for $entity {
            type Id = i32;

            fn row_id(&self) -> i32 {
                self.id
            }
        })+
    };
}

list_row_by_id!(
    crate::domain::blog::Blog,
    crate::domain::contact::ContactMessage,
    crate::domain::image::ImageAsset,
    crate::domain::order::Order,
    crate::domain::service::Service,
    crate::domain::user::User,
);

/// Client-side filter applied on top of whatever the server returned.
pub trait RowFilter<T> {
    /// Whether the row stays visible under this filter set and the committed
    /// search term. `search` is already debounced; implementations decide how
    /// to match it.
    fn matches(&self, row: &T, search: &str) -> bool;
}

/// Matches everything; for lists whose filtering is entirely server-side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unfiltered;

impl<T> RowFilter<T> for Unfiltered {
    fn matches(&self, _row: &T, _search: &str) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    /// First fetch; nothing usable to show yet.
    Loading,
    /// Fetch in flight while the previous rows stay on screen.
    Refreshing,
}

/// Search input with a settle delay.
///
/// The clock is passed in by the caller, so tests drive time explicitly
/// instead of sleeping.
#[derive(Clone, Debug)]
pub struct Debounce {
    delay: Duration,
    input: String,
    committed: String,
    deadline: Option<Instant>,
}

impl Debounce {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            input: String::new(),
            committed: String::new(),
            deadline: None,
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The term searches actually run with.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Records a keystroke and re-arms the settle timer.
    pub fn set_input(&mut self, value: impl Into<String>, now: Instant) {
        self.input = value.into();
        self.deadline = Some(now + self.delay);
    }

    /// Commits the pending input once the timer has settled. Returns `true`
    /// when the committed term changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.commit()
            }
            _ => false,
        }
    }

    /// Commits immediately, e.g. when the user presses Enter.
    pub fn flush(&mut self) -> bool {
        self.deadline = None;
        self.commit()
    }

    fn commit(&mut self) -> bool {
        if self.committed == self.input {
            return false;
        }
        self.committed.clone_from(&self.input);
        true
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

/// State for one admin list page: the current page of rows plus everything
/// the table chrome needs.
#[derive(Debug)]
pub struct ListState<T: ListRow, F> {
    rows: Vec<T>,
    total: TotalCount,
    page: usize,
    per_page: usize,
    phase: LoadPhase,
    search: Debounce,
    filters: F,
    issued_seq: u64,
    toggling: HashSet<T::Id>,
    pending_delete: Option<T>,
    pub notices: NoticeQueue,
}

impl<T: ListRow, F: Default> ListState<T, F> {
    #[must_use]
    pub fn new(per_page: usize) -> Self {
        Self {
            rows: Vec::new(),
            total: TotalCount::Unknown,
            page: 1,
            per_page: per_page.max(1),
            phase: LoadPhase::Idle,
            search: Debounce::default(),
            filters: F::default(),
            issued_seq: 0,
            toggling: HashSet::new(),
            pending_delete: None,
            notices: NoticeQueue::default(),
        }
    }
}

impl<T: ListRow, F> ListState<T, F> {
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    #[must_use]
    pub fn total(&self) -> TotalCount {
        self.total
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.phase != LoadPhase::Idle
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total.pages(self.per_page)
    }

    #[must_use]
    pub fn filters(&self) -> &F {
        &self.filters
    }

    /// Moves to another page. Returns `true` when the page actually changed
    /// and the caller should refetch; out-of-range targets are ignored.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page == 0 || page == self.page || page > self.total_pages() {
            return false;
        }
        self.page = page;
        true
    }

    /// Records a keystroke in the search box.
    pub fn set_search_input(&mut self, value: impl Into<String>, now: Instant) {
        self.search.set_input(value, now);
    }

    #[must_use]
    pub fn search_input(&self) -> &str {
        self.search.input()
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        self.search.committed()
    }

    /// Commits a settled search term. Returns `true` when the term changed;
    /// the page resets to 1 so results start from the top.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        if self.search.poll(now) {
            self.page = 1;
            return true;
        }
        false
    }

    /// Commits the search term immediately.
    pub fn flush_search(&mut self) -> bool {
        if self.search.flush() {
            self.page = 1;
            return true;
        }
        false
    }

    /// Replaces the filter set. Any change resets to the first page.
    pub fn set_filters(&mut self, filters: F) -> bool
    where
        F: PartialEq,
    {
        if self.filters == filters {
            return false;
        }
        self.filters = filters;
        self.page = 1;
        true
    }

    /// Starts a fetch, returning its sequence number. Later fetches
    /// supersede earlier ones; see [`ListState::apply_fetch`].
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued_seq += 1;
        self.phase = if self.rows.is_empty() {
            LoadPhase::Loading
        } else {
            LoadPhase::Refreshing
        };
        self.issued_seq
    }

    /// Installs a fetched page if `seq` is still the newest fetch. Returns
    /// whether the response was applied; stale responses are dropped.
    pub fn apply_fetch(&mut self, seq: u64, total: TotalCount, rows: Vec<T>) -> bool {
        if seq != self.issued_seq {
            return false;
        }
        self.rows = rows;
        self.total = total;
        self.phase = LoadPhase::Idle;
        true
    }

    /// Marks a fetch as failed, keeping the rows already on screen. Returns
    /// `false` when a newer fetch is in flight and the failure is moot.
    pub fn fetch_failed(&mut self, seq: u64) -> bool {
        if seq != self.issued_seq {
            return false;
        }
        self.phase = LoadPhase::Idle;
        true
    }

    /// The current page filtered down to the rows the table shows.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&T>
    where
        F: RowFilter<T>,
    {
        let term = self.search.committed();
        self.rows
            .iter()
            .filter(|row| self.filters.matches(row, term))
            .collect()
    }

    /// Snapshot of the visible rows with the pagination strip.
    #[must_use]
    pub fn paginated(&self) -> Paginated<&T>
    where
        F: RowFilter<T>,
    {
        Paginated::new(self.visible_rows(), self.page, self.total, self.per_page)
    }

    /// Claims a row for an optimistic toggle and returns a snapshot for
    /// rollback. `None` while an earlier toggle on the same row is still in
    /// flight, so a double click cannot race itself.
    pub fn begin_toggle(&mut self, id: T::Id) -> Option<T>
    where
        T: Clone,
    {
        if self.toggling.contains(&id) {
            return None;
        }
        let snapshot = self.rows.iter().find(|row| row.row_id() == id)?.clone();
        self.toggling.insert(id);
        Some(snapshot)
    }

    #[must_use]
    pub fn is_toggling(&self, id: T::Id) -> bool {
        self.toggling.contains(&id)
    }

    /// Edits a row in place, usually to apply an optimistic flip.
    pub fn apply_row(&mut self, id: T::Id, edit: impl FnOnce(&mut T)) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.row_id() == id) {
            edit(row);
        }
    }

    /// Replaces the matching row, e.g. with the server's echo or a rollback
    /// snapshot.
    pub fn restore_row(&mut self, snapshot: T) {
        let id = snapshot.row_id();
        if let Some(row) = self.rows.iter_mut().find(|row| row.row_id() == id) {
            *row = snapshot;
        }
    }

    /// Releases the per-row toggle claim.
    pub fn finish_toggle(&mut self, id: T::Id) {
        self.toggling.remove(&id);
    }

    /// Stages a row for deletion pending the user's confirmation.
    pub fn request_delete(&mut self, id: T::Id) -> bool
    where
        T: Clone,
    {
        self.pending_delete = self.rows.iter().find(|row| row.row_id() == id).cloned();
        self.pending_delete.is_some()
    }

    #[must_use]
    pub fn pending_delete(&self) -> Option<&T> {
        self.pending_delete.as_ref()
    }

    /// Takes the staged row once the user confirms.
    pub fn take_confirmed_delete(&mut self) -> Option<T> {
        self.pending_delete.take()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

/// State for the public feed, where "load more" appends instead of paging.
#[derive(Debug)]
pub struct FeedState<T, F> {
    rows: Vec<T>,
    next_page: usize,
    per_page: usize,
    has_more: bool,
    phase: LoadPhase,
    search: Debounce,
    filters: F,
    issued_seq: u64,
    resetting: bool,
    pub notices: NoticeQueue,
}

impl<T, F: Default> FeedState<T, F> {
    #[must_use]
    pub fn new(per_page: usize) -> Self {
        Self {
            rows: Vec::new(),
            next_page: 1,
            per_page: per_page.max(1),
            has_more: false,
            phase: LoadPhase::Idle,
            search: Debounce::default(),
            filters: F::default(),
            issued_seq: 0,
            resetting: false,
            notices: NoticeQueue::default(),
        }
    }
}

impl<T, F> FeedState<T, F> {
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    #[must_use]
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// The page the next fetch should request.
    #[must_use]
    pub fn next_page(&self) -> usize {
        self.next_page
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn set_search_input(&mut self, value: impl Into<String>, now: Instant) {
        self.search.set_input(value, now);
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        self.search.committed()
    }

    /// A settled search term changed; the feed must be reloaded from the top.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        self.search.poll(now)
    }

    /// Replaces the filter set; any change reloads the feed from the top.
    pub fn set_filters(&mut self, filters: F) -> bool
    where
        F: PartialEq,
    {
        if self.filters == filters {
            return false;
        }
        self.filters = filters;
        true
    }

    /// Starts reloading from page 1.
    pub fn begin_reset(&mut self) -> u64 {
        self.issued_seq += 1;
        self.resetting = true;
        self.next_page = 1;
        self.phase = LoadPhase::Loading;
        self.issued_seq
    }

    /// Starts fetching the next page, or `None` when there is nothing more
    /// to load or a fetch is already running.
    pub fn begin_load_more(&mut self) -> Option<u64> {
        if !self.has_more || self.phase != LoadPhase::Idle {
            return None;
        }
        self.issued_seq += 1;
        self.resetting = false;
        self.phase = LoadPhase::Refreshing;
        Some(self.issued_seq)
    }

    /// Installs a fetched page: replacing the feed after a reset, appending
    /// after a load-more. A page that comes back full means more may follow.
    pub fn apply_fetch(&mut self, seq: u64, rows: Vec<T>) -> bool {
        if seq != self.issued_seq {
            return false;
        }
        self.has_more = rows.len() == self.per_page;
        if self.resetting {
            self.rows = rows;
        } else {
            self.rows.extend(rows);
        }
        self.next_page += 1;
        self.phase = LoadPhase::Idle;
        true
    }

    /// Marks the in-flight fetch as failed.
    pub fn fetch_failed(&mut self, seq: u64) -> bool {
        if seq != self.issued_seq {
            return false;
        }
        self.phase = LoadPhase::Idle;
        true
    }

    /// Everything loaded so far that passes the filter set.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&T>
    where
        F: RowFilter<T>,
    {
        let term = self.search.committed();
        self.rows
            .iter()
            .filter(|row| self.filters.matches(row, term))
            .collect()
    }
}
