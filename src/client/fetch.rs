//! Collection state for list pages: items, loading flag and error text.

use std::future::Future;

use crate::catalog::filter::Listable;
use crate::error::AdminError;

/// Identifies one load. Only the most recent ticket may write results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone)]
pub struct FetchState<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
    loaded: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            generation: 0,
            loaded: false,
        }
    }
}

impl<T> FetchState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True once any load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Start a load; any load started earlier becomes stale.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Record the outcome of a load. Returns false when the ticket was stale
    /// and the result was dropped.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<Vec<T>, AdminError>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "dropping stale load result"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.loaded = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed");
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Run `fut` as a fresh load.
    pub async fn load<F>(&mut self, fut: F) -> bool
    where
        F: Future<Output = Result<Vec<T>, AdminError>>,
    {
        let ticket = self.begin();
        let result = fut.await;
        self.finish(ticket, result)
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

impl<T: Listable> FetchState<T> {
    pub fn find(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Drop the item with `key` locally. Returns the removed item.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.key() == key)?;
        Some(self.items.remove(index))
    }

    /// Replace the item with the same key, or append it.
    pub fn upsert(&mut self, item: T) {
        match self.items.iter().position(|existing| existing.key() == item.key()) {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
    }
}
