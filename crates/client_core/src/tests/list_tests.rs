use std::sync::Arc;

use async_trait::async_trait;
use shared::{domain::Item, protocol::SubmitOutcome};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::error::SubmitTransport;

struct StaticRepository {
    items: Vec<Item>,
    fail_with: Option<String>,
    wait_for_cancel: bool,
    fetch_calls: Arc<Mutex<u32>>,
}

impl StaticRepository {
    fn with_items(items: Vec<Item>) -> Self {
        Self {
            items,
            fail_with: None,
            wait_for_cancel: false,
            fetch_calls: Arc::new(Mutex::new(0)),
        }
    }

    fn failing(message: impl Into<String>) -> Self {
        let mut repo = Self::with_items(Vec::new());
        repo.fail_with = Some(message.into());
        repo
    }

    fn waiting_for_cancel() -> Self {
        let mut repo = Self::with_items(Vec::new());
        repo.wait_for_cancel = true;
        repo
    }
}

#[async_trait]
impl ItemRepository for StaticRepository {
    async fn fetch_items(&self, cancel: CancellationToken) -> Result<Vec<Item>, FetchFailed> {
        *self.fetch_calls.lock().await += 1;
        if self.wait_for_cancel {
            // Same contract as the HTTP repository: cancellation resolves
            // empty instead of failing.
            cancel.cancelled().await;
            return Ok(Vec::new());
        }
        if let Some(message) = &self.fail_with {
            return Err(FetchFailed(message.clone()));
        }
        Ok(self.items.clone())
    }

    async fn submit_item(&self, _item: &Item) -> Result<SubmitOutcome, SubmitTransport> {
        Ok(SubmitOutcome::Rejected {
            message: "submit not under test".to_string(),
        })
    }
}

fn item(title: &str) -> Item {
    Item::new(
        title,
        vec!["a paragraph".to_string()],
        "https://example.com/a.jpg",
        "alt text",
    )
}

#[tokio::test]
async fn load_stores_the_fetched_sequence_verbatim() {
    let repo = Arc::new(StaticRepository::with_items(vec![
        item("A"),
        item("B"),
        item("C"),
    ]));
    let controller = ListController::new(repo);

    controller.load().await.expect("load");

    let snapshot = controller.snapshot().await;
    let titles: Vec<_> = snapshot
        .iter()
        .map(|entry| entry.item.title.as_str())
        .collect();
    assert_eq!(titles, ["A", "B", "C"]);
    assert!(snapshot.iter().all(|entry| !entry.saving));
}

#[tokio::test]
async fn load_failure_lands_in_failed_and_returns_the_error() {
    let repo = Arc::new(StaticRepository::failing("backend unreachable"));
    let controller = ListController::new(repo);

    let err = controller.load().await.expect_err("must fail");
    assert_eq!(err, FetchFailed("backend unreachable".to_string()));
    assert_eq!(
        controller.state().await,
        LoadState::Failed("backend unreachable".to_string())
    );
}

#[tokio::test]
async fn load_runs_once_later_calls_are_noops() {
    let repo = Arc::new(StaticRepository::with_items(vec![item("A")]));
    let calls = repo.fetch_calls.clone();
    let controller = ListController::new(repo);

    controller.load().await.expect("first load");
    controller.load().await.expect("second load");

    assert_eq!(*calls.lock().await, 1);
    assert_eq!(controller.snapshot().await.len(), 1);
}

#[tokio::test]
async fn teardown_during_load_resolves_loaded_empty_not_failed() {
    let repo = Arc::new(StaticRepository::waiting_for_cancel());
    let controller = Arc::new(ListController::new(repo));

    let loader = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.load().await })
    };
    tokio::task::yield_now().await;

    controller.teardown();
    loader.await.expect("join").expect("cancelled load succeeds");

    assert_eq!(controller.state().await, LoadState::Loaded(Vec::new()));
}

#[tokio::test]
async fn teardown_before_load_still_reaches_loaded_empty() {
    let repo = Arc::new(StaticRepository::waiting_for_cancel());
    let controller = ListController::new(repo);

    controller.teardown();
    controller.load().await.expect("load");

    assert_eq!(controller.state().await, LoadState::Loaded(Vec::new()));
}
