//! Book list controller: paging, search and guarded deletion.
//!
//! The controller owns what a screen would show (the current page of books,
//! the cursor, the loading flag and the open delete confirmation) and issues
//! backend calls in response to explicit commands. Rendering is left to the
//! caller, which reads [`BookList::snapshot`].
//!
//! Every fetch is tagged with a generation number and runs as its own task.
//! Starting a fetch aborts the one before it, and a completion that arrives
//! after a newer fetch was issued is dropped, so results never land out of
//! order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};
use tokio::task::JoinHandle;

use super::notifier::{Notice, Notifier};
use crate::api::{Book, BookApi, BookQuery};

/// Books per page.
pub const PAGE_SIZE: u32 = 10;

const ORDERED_MESSAGE: &str = "This book has already been ordered and cannot be deleted.";
const DELETED_MESSAGE: &str = "Book deleted.";
const DELETE_FAILED_MESSAGE: &str = "Deleting the book failed.";

/// The book whose deletion is awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionTarget {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookListState {
    pub books: Vec<Book>,
    pub total_page: u32,
    /// 1-based.
    pub page: u32,
    /// Committed search key; what fetches use.
    pub key: String,
    /// Search box contents, not yet committed.
    pub search_input: String,
    pub loading: bool,
    /// Why the last fetch failed; cleared by the next successful one.
    pub load_error: Option<String>,
    pub pending_delete: Option<DeletionTarget>,
}

impl Default for BookListState {
    fn default() -> Self {
        Self {
            books: Vec::new(),
            total_page: 0,
            page: 1,
            key: String::new(),
            search_input: String::new(),
            loading: false,
            load_error: None,
            pending_delete: None,
        }
    }
}

impl BookListState {
    /// Position of the `index`-th row on this page across the whole listing.
    pub fn row_number(&self, index: usize) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(PAGE_SIZE) + index as u64 + 1
    }

    /// Pagination controls only make sense with more than one page.
    pub fn show_pagination(&self) -> bool {
        self.total_page > 1
    }

    pub fn confirmation_open(&self) -> bool {
        self.pending_delete.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The book has orders; delete was not called.
    Blocked { orders: usize },
    Failed,
    NothingPending,
}

pub struct BookList<A: BookApi + 'static> {
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<BookListState>>,
    generation: Arc<AtomicU64>,
    inflight: Option<JoinHandle<()>>,
}

fn lock(state: &Mutex<BookListState>) -> MutexGuard<'_, BookListState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

impl<A: BookApi + 'static> BookList<A> {
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_state(api, notifier, BookListState::default())
    }

    /// Starts from a given cursor, e.g. page and key taken from the command line.
    pub fn with_state(api: Arc<A>, notifier: Arc<dyn Notifier>, state: BookListState) -> Self {
        Self {
            api,
            notifier,
            state: Arc::new(Mutex::new(state)),
            generation: Arc::new(AtomicU64::new(0)),
            inflight: None,
        }
    }

    pub fn snapshot(&self) -> BookListState {
        lock(&self.state).clone()
    }

    /// Fetches the page for the current `(page, key)`, replacing any fetch
    /// still in flight. Must be called inside a Tokio runtime.
    pub fn load(&mut self) {
        if let Some(previous) = self.inflight.take() {
            previous.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = {
            let mut state = lock(&self.state);
            state.loading = true;
            BookQuery::newest(state.key.clone(), state.page, PAGE_SIZE)
        };
        debug!(
            "Fetching books page {} key {:?} (generation {})",
            query.page, query.key, generation
        );

        let api = self.api.clone();
        let state = self.state.clone();
        let latest = self.generation.clone();

        self.inflight = Some(tokio::spawn(async move {
            let result = api.list(&query).await;

            let mut guard = lock(&state);
            if latest.load(Ordering::SeqCst) != generation {
                debug!("Dropping superseded book fetch (generation {})", generation);
                return;
            }

            guard.loading = false;
            match result {
                Ok(page) => {
                    guard.books = page.data;
                    guard.total_page = page.pagination.total_page;
                    guard.load_error = None;
                }
                Err(e) => {
                    warn!("Failed to fetch books page {}: {:#}", query.page, e);
                    guard.load_error = Some(format!("{:#}", e));
                }
            }
        }));
    }

    /// Waits for the fetch in flight, if any.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.inflight.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!("Book fetch task failed: {}", e);
                }
            }
        }
    }

    /// Moves to `page` (clamped to 1) and re-fetches when it changed.
    /// Returns whether a fetch was issued.
    pub fn change_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        {
            let mut state = lock(&self.state);
            if state.page == page {
                return false;
            }
            state.page = page;
        }
        self.load();
        true
    }

    pub fn set_search_input(&self, text: impl Into<String>) {
        lock(&self.state).search_input = text.into();
    }

    /// Commits the search box as the key and goes back to page 1, fetching
    /// once if either changed. Returns whether a fetch was issued.
    pub fn commit_search(&mut self) -> bool {
        let changed = {
            let mut state = lock(&self.state);
            let changed = state.key != state.search_input || state.page != 1;
            state.key = state.search_input.clone();
            state.page = 1;
            changed
        };
        if changed {
            self.load();
        }
        changed
    }

    /// Opens the delete confirmation for one book.
    pub fn request_delete(&self, id: impl Into<String>, name: impl Into<String>) {
        lock(&self.state).pending_delete = Some(DeletionTarget {
            id: id.into(),
            name: name.into(),
        });
    }

    pub fn cancel_delete(&self) {
        lock(&self.state).pending_delete = None;
    }

    /// Runs the confirmed deletion.
    ///
    /// A book that appears in any order is never deleted. Otherwise the
    /// book is deleted and dropped from the listed page. The confirmation
    /// is closed whatever happens.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_delete(&self) -> DeleteOutcome {
        let Some(target) = lock(&self.state).pending_delete.take() else {
            return DeleteOutcome::NothingPending;
        };

        match self.delete_unless_ordered(&target).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Deleting book {} ({}) failed: {:#}", target.id, target.name, e);
                self.notifier
                    .notify(Notice::Alert(DELETE_FAILED_MESSAGE.to_string()));
                DeleteOutcome::Failed
            }
        }
    }

    async fn delete_unless_ordered(&self, target: &DeletionTarget) -> anyhow::Result<DeleteOutcome> {
        let orders = self.api.check_is_ordered(&target.id).await?;
        if !orders.is_empty() {
            debug!("Book {} appears in {} order(s)", target.id, orders.len());
            self.notifier
                .notify(Notice::Error(ORDERED_MESSAGE.to_string()));
            return Ok(DeleteOutcome::Blocked {
                orders: orders.len(),
            });
        }

        self.api.delete(&target.id).await?;

        lock(&self.state).books.retain(|book| book.id != target.id);
        self.notifier
            .notify(Notice::Success(DELETED_MESSAGE.to_string()));
        Ok(DeleteOutcome::Deleted)
    }
}
