use std::sync::Arc;

use shared::domain::Item;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{error::FetchFailed, ItemRepository};

/// One row of the list snapshot. `saving` marks a provisional entry whose
/// create request has not resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub item: Item,
    pub saving: bool,
}

impl ListEntry {
    pub fn confirmed(item: Item) -> Self {
        Self {
            item,
            saving: false,
        }
    }

    pub fn pending(item: Item) -> Self {
        Self { item, saving: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<ListEntry>),
    Failed(String),
}

/// Owns the list snapshot and drives the one initial load.
///
/// State machine: `Idle -> Loading -> Loaded | Failed`. Teardown while
/// loading cancels cooperatively and lands in `Loaded(empty)` rather than
/// `Failed`; see [`ItemRepository::fetch_items`]. Known sharp edge: a
/// cancelled load is indistinguishable from an empty backend.
pub struct ListController<R: ItemRepository> {
    repo: Arc<R>,
    state: RwLock<LoadState>,
    cancel: CancellationToken,
}

impl<R: ItemRepository> ListController<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            state: RwLock::new(LoadState::Idle),
            cancel: CancellationToken::new(),
        }
    }

    /// Runs the initial load. Only the `Idle -> Loading` transition starts
    /// a fetch; any later call is a no-op, so at most one fetch is ever in
    /// flight.
    ///
    /// The `FetchFailed` is both recorded in the state and returned, so a
    /// caller can escalate it to its top-level fallback.
    pub async fn load(&self) -> Result<(), FetchFailed> {
        {
            let mut state = self.state.write().await;
            if !matches!(*state, LoadState::Idle) {
                return Ok(());
            }
            *state = LoadState::Loading;
        }

        match self.repo.fetch_items(self.cancel.child_token()).await {
            Ok(items) => {
                info!(count = items.len(), "item list loaded");
                let entries = items.into_iter().map(ListEntry::confirmed).collect();
                *self.state.write().await = LoadState::Loaded(entries);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "item list load failed");
                *self.state.write().await = LoadState::Failed(err.0.clone());
                Err(err)
            }
        }
    }

    /// Signals teardown. An in-flight fetch observes the token and
    /// resolves empty; its network result, if any, is discarded.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub async fn state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// Current snapshot; empty unless `Loaded`.
    pub async fn snapshot(&self) -> Vec<ListEntry> {
        match &*self.state.read().await {
            LoadState::Loaded(entries) => entries.clone(),
            _ => Vec::new(),
        }
    }

    /// Replaces the `Loaded` snapshot with a rewritten one. No-op in any
    /// other state, so a reconciliation that loses a race with teardown
    /// falls away silently.
    pub(crate) async fn rewrite(&self, rewrite: impl FnOnce(Vec<ListEntry>) -> Vec<ListEntry>) {
        let mut state = self.state.write().await;
        if let LoadState::Loaded(entries) = &mut *state {
            let snapshot = std::mem::take(entries);
            *entries = rewrite(snapshot);
        }
    }
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
