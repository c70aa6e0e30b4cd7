//! Headless model of the search overlay.
//!
//! Holds the overlay's local state and decides when a network request is
//! due. The caller owns the clock and the transport: feed keystrokes with
//! [`SearchOverlay::input`], call [`SearchOverlay::poll`] from a timer to
//! collect due requests, and hand responses back with
//! [`SearchOverlay::receive`]. Only the response to the request issued for
//! the current text is applied; editing the text after a request went out
//! orphans it, so a slow earlier response can never overwrite newer results.

use std::time::{Duration, Instant};

use crate::search::MIN_QUERY_LENGTH;

/// Quiet period after the last keystroke before a request is issued.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Message shown when the backend call fails.
pub const GENERIC_ERROR: &str = "Search is unavailable right now. Please try again.";

/// A request the caller should send; `seq` must be echoed back to `receive`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone)]
struct Pending {
    query: String,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct SearchOverlay<R> {
    open: bool,
    query: String,
    results: Vec<R>,
    highlighted: Option<usize>,
    pending: Option<Pending>,
    last_issued: u64,
    /// Sequence number of the request issued for the current text.
    awaiting: Option<u64>,
    loading: bool,
    error: Option<&'static str>,
}

impl<R> Default for SearchOverlay<R> {
    fn default() -> Self {
        Self {
            open: false,
            query: String::new(),
            results: Vec::new(),
            highlighted: None,
            pending: None,
            last_issued: 0,
            awaiting: None,
            loading: false,
            error: None,
        }
    }
}

impl<R> SearchOverlay<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the overlay and forget the query, results and pending work.
    pub fn close(&mut self) {
        self.open = false;
        self.reset_query();
    }

    /// Record a change of the input text at `now`.
    pub fn input(&mut self, text: &str, now: Instant) {
        if text != self.query {
            self.awaiting = None;
        }
        self.query = text.to_string();
        if text.trim().chars().count() < MIN_QUERY_LENGTH {
            self.pending = None;
            self.results.clear();
            self.highlighted = None;
            self.loading = false;
            self.error = None;
            return;
        }
        self.pending = Some(Pending {
            query: text.trim().to_string(),
            due: now + DEBOUNCE,
        });
    }

    /// Issue the pending request if its debounce window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        let due = self.pending.as_ref().is_some_and(|p| p.due <= now);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        self.last_issued += 1;
        self.awaiting = Some(self.last_issued);
        self.loading = true;
        Some(SearchRequest {
            seq: self.last_issued,
            query: pending.query,
        })
    }

    /// Apply a response. Returns `false` when the response is stale and was
    /// discarded.
    pub fn receive(&mut self, seq: u64, outcome: Result<Vec<R>, String>) -> bool {
        if self.awaiting != Some(seq) {
            return false;
        }
        self.awaiting = None;
        self.loading = false;
        self.highlighted = None;
        match outcome {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(_) => {
                self.results.clear();
                self.error = Some(GENERIC_ERROR);
            }
        }
        true
    }

    /// Move the highlight down, wrapping to the first result.
    pub fn move_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < self.results.len() => i + 1,
            _ => 0,
        });
    }

    /// Move the highlight up, wrapping to the last result.
    pub fn move_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let last = self.results.len() - 1;
        self.highlighted = Some(match self.highlighted {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
    }

    /// Highlight the result under the pointer.
    pub fn hover(&mut self, index: usize) {
        if index < self.results.len() {
            self.highlighted = Some(index);
        }
    }

    /// The result activated by Enter, if one is highlighted.
    pub fn enter(&self) -> Option<&R> {
        self.highlighted.and_then(|i| self.results.get(i))
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[R] {
        &self.results
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    fn reset_query(&mut self) {
        self.query.clear();
        self.results.clear();
        self.highlighted = None;
        self.pending = None;
        self.awaiting = None;
        self.loading = false;
        self.error = None;
    }
}
