//! Page session state
//!
//! The server keeps one of these per page load. Searches are not cancelled:
//! whichever completes last decides what the page shows.

use crate::error::{Error, Result};
use crate::results::{sort_results, SortKey, ViewMode};
use crate::search::DisplayLocation;
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSession {
    /// Stored in arrival order; presentation sorts a copy
    pub results: Vec<DisplayLocation>,
    pub loading: bool,
    pub has_searched: bool,
    pub error: Option<String>,
    pub sort: SortKey,
    pub view: ViewMode,
}

impl PageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A search has been dispatched
    pub fn begin_search(&mut self) {
        self.loading = true;
        self.has_searched = true;
        self.error = None;
    }

    /// Record a search outcome, replacing the previous result set entirely
    pub fn complete(&mut self, outcome: &Result<Vec<DisplayLocation>>) {
        match outcome {
            Ok(results) => {
                self.results = results.clone();
            }
            Err(e) => {
                error!(error = %e, "search failed");
                self.results.clear();
                self.error = Some(e.user_message());
            }
        }
        self.loading = false;
    }

    /// Record a failure that happened before any search was dispatched
    pub fn reject(&mut self, err: &Error) {
        self.error = Some(err.user_message());
        self.loading = false;
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Results in the selected order
    pub fn sorted_results(&self) -> Vec<DisplayLocation> {
        sort_results(&self.results, self.sort)
    }

    /// Copy of the session with results in the selected order
    pub fn snapshot(&self) -> Self {
        Self {
            results: self.sorted_results(),
            ..self.clone()
        }
    }
}
