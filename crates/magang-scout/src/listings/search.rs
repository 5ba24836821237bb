use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{normalize, DisplayListing};
use super::provider::{ListingError, ListingProvider};
use super::query::ListingQuery;
use crate::filters::FilterCriteria;

/// What a front end renders: the latest published results and whether a search is running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchSnapshot {
    pub loading: bool,
    pub listings: Vec<DisplayListing>,
}

#[derive(Debug, Default)]
struct SearchState {
    generation: u64,
    loading: bool,
    listings: Vec<DisplayListing>,
}

/// Runs listing searches and publishes the results of the most recently issued one.
pub struct ListingSearch<P> {
    provider: Arc<P>,
    state: Mutex<SearchState>,
}

impl<P> ListingSearch<P>
where
    P: ListingProvider + 'static,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            state: Mutex::new(SearchState::default()),
        }
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        let state = lock_state(&self.state);
        SearchSnapshot {
            loading: state.loading,
            listings: state.listings.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        lock_state(&self.state).loading
    }

    /// One provider round trip. The outcome is published into the snapshot (empty on
    /// failure) unless a newer search was issued meanwhile; the error is handed back.
    pub async fn try_query(
        &self,
        query: &ListingQuery,
    ) -> Result<Vec<DisplayListing>, ListingError> {
        let pending = self.begin();

        match self.provider.fetch(query).await {
            Ok(records) => {
                let listings = normalize(records);
                info!(count = listings.len(), "vacancy search completed");
                pending.publish(listings.clone());
                Ok(listings)
            }
            Err(err) => {
                warn!(error = %err, "vacancy search failed");
                pending.publish(Vec::new());
                Err(err)
            }
        }
    }

    pub async fn try_search(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<DisplayListing>, ListingError> {
        self.try_query(&ListingQuery::from_criteria(criteria)).await
    }

    /// Explicit search action. Failures yield no listings; the loading flag is cleared
    /// once the latest search completes or is abandoned.
    pub async fn search(&self, criteria: &FilterCriteria) -> Vec<DisplayListing> {
        self.try_search(criteria).await.unwrap_or_default()
    }

    fn begin(&self) -> PendingSearch<'_> {
        let mut state = lock_state(&self.state);
        state.generation += 1;
        state.loading = true;
        state.listings.clear();
        PendingSearch {
            state: &self.state,
            generation: state.generation,
            published: false,
        }
    }
}

fn lock_state(state: &Mutex<SearchState>) -> MutexGuard<'_, SearchState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One in-flight search. Dropped unpublished, it still clears the loading flag unless a
/// newer search has started.
struct PendingSearch<'a> {
    state: &'a Mutex<SearchState>,
    generation: u64,
    published: bool,
}

impl PendingSearch<'_> {
    fn publish(mut self, listings: Vec<DisplayListing>) {
        self.published = true;
        let mut state = lock_state(self.state);
        if state.generation != self.generation {
            debug!(
                search = self.generation,
                current = state.generation,
                "discarding results of superseded search"
            );
            return;
        }

        state.loading = false;
        state.listings = listings;
    }
}

impl Drop for PendingSearch<'_> {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        let mut state = lock_state(self.state);
        if state.generation == self.generation {
            debug!(search = self.generation, "search abandoned before completion");
            state.loading = false;
        }
    }
}
