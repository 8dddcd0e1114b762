//! Debounced search
//!
//! [`DebounceTimer`] is a cancellable deferred task: scheduling aborts
//! whatever was pending and restarts the quiet period. [`DebouncedSearch`]
//! runs catalog searches through it and reports outcomes over a channel,
//! tagged with a generation so anything superseded is dropped on receipt.
//!
//! Both spawn onto the ambient tokio runtime.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::filter::Filtered;
use crate::api::{CatalogError, CatalogService};
use crate::models::SearchResult;

/// Quiet period before a query is evaluated
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Single-shot timer that runs a task after `delay` unless replaced first
#[derive(Debug)]
pub struct DebounceTimer {
    delay: Duration,
    handle: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            handle: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending task and schedule `task` after the delay
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Abort the pending task. Returns true if one was still running.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Result of one filtering pass
#[derive(Debug)]
pub struct SearchOutcome {
    pub generation: u64,
    pub query: String,
    pub result: Result<Filtered<SearchResult>, CatalogError>,
}

/// Last-query-wins search driver
pub struct DebouncedSearch {
    catalog: Arc<dyn CatalogService>,
    timer: DebounceTimer,
    generation: u64,
    loading: bool,
    tx: mpsc::UnboundedSender<SearchOutcome>,
    rx: mpsc::UnboundedReceiver<SearchOutcome>,
}

impl fmt::Debug for DebouncedSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebouncedSearch")
            .field("timer", &self.timer)
            .field("generation", &self.generation)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl DebouncedSearch {
    pub fn new(catalog: Arc<dyn CatalogService>, quiet: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            catalog,
            timer: DebounceTimer::new(quiet),
            generation: 0,
            loading: false,
            tx,
            rx,
        }
    }

    /// Restart the quiet period with `query`
    ///
    /// An empty query cancels instead; there is nothing to evaluate.
    pub fn submit(&mut self, query: &str) {
        if query.is_empty() {
            self.clear();
            return;
        }

        self.generation += 1;
        self.loading = true;

        let generation = self.generation;
        let query = query.to_string();
        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        debug!(generation, %query, "search scheduled");

        self.timer.schedule(async move {
            let result = catalog.search(&query).await.map(Filtered::from_vec);
            // Receiver lives as long as the driver; a send error means it is gone.
            let _ = tx.send(SearchOutcome {
                generation,
                query,
                result,
            });
        });
    }

    /// Drop the pending query, if any
    pub fn clear(&mut self) {
        self.generation += 1;
        if self.timer.cancel() {
            debug!(generation = self.generation, "pending search cancelled");
        }
        self.loading = false;
    }

    /// True from submit until the matching outcome is received
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Non-blocking poll for the current generation's outcome
    pub fn try_next(&mut self) -> Option<SearchOutcome> {
        while let Ok(outcome) = self.rx.try_recv() {
            if let Some(outcome) = self.accept(outcome) {
                return Some(outcome);
            }
        }
        None
    }

    /// Wait for the current generation's outcome
    pub async fn next(&mut self) -> Option<SearchOutcome> {
        loop {
            let outcome = self.rx.recv().await?;
            if let Some(outcome) = self.accept(outcome) {
                return Some(outcome);
            }
        }
    }

    fn accept(&mut self, outcome: SearchOutcome) -> Option<SearchOutcome> {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                "dropping superseded search outcome"
            );
            return None;
        }
        self.loading = false;
        Some(outcome)
    }
}
