use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{domain::Item, protocol::SubmitOutcome};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{error::SubmitTransport, list::ListController, reconcile, ItemRepository};

/// How a create operation is reflected in the snapshot while in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPolicy {
    /// Block the form until the server confirms, then prepend.
    Deferred,
    /// Prepend a provisional entry immediately and reconcile on
    /// resolution.
    Optimistic,
}

/// Presentation-facing view of the creation form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub open: bool,
    pub submitting: bool,
    /// Inline error shown next to the form (deferred rejections).
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDisposition {
    /// Confirmed by the server and reconciled into the snapshot.
    Completed,
    /// Rejected by the server; the form input is preserved for retry.
    Rejected(String),
    /// Another submission was still in flight; nothing changed.
    AlreadyPending,
}

/// Drives a single create operation and reconciles it into the list
/// snapshot. At most one submission is in flight at a time; overlapping
/// calls are rejected as no-ops.
///
/// Transport errors are returned to the caller untouched. They are not
/// locally retryable and belong at the same boundary as a failed load.
pub struct SubmissionController<R: ItemRepository> {
    repo: Arc<R>,
    policy: SubmitPolicy,
    form: RwLock<FormState>,
    /// Transient message outside the form (optimistic rejections).
    notice: RwLock<Option<String>>,
    in_flight: AtomicBool,
}

impl<R: ItemRepository> SubmissionController<R> {
    pub fn new(repo: Arc<R>, policy: SubmitPolicy) -> Self {
        Self {
            repo,
            policy,
            form: RwLock::new(FormState::default()),
            notice: RwLock::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    pub async fn open_form(&self) {
        let mut form = self.form.write().await;
        form.open = true;
        form.submitting = false;
        form.error = None;
    }

    pub async fn close_form(&self) {
        *self.form.write().await = FormState::default();
    }

    pub async fn form(&self) -> FormState {
        self.form.read().await.clone()
    }

    /// Takes the pending transient notice, if any.
    pub async fn take_notice(&self) -> Option<String> {
        self.notice.write().await.take()
    }

    /// Submits `item` and reconciles the resolution into `list`.
    pub async fn submit(
        &self,
        list: &ListController<R>,
        item: Item,
    ) -> Result<SubmitDisposition, SubmitTransport> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!(title = %item.title, "submit ignored; another submission is in flight");
            return Ok(SubmitDisposition::AlreadyPending);
        }

        let result = match self.policy {
            SubmitPolicy::Deferred => self.submit_deferred(list, item).await,
            SubmitPolicy::Optimistic => self.submit_optimistic(list, item).await,
        };
        self.in_flight.store(false, Ordering::Release);
        result
    }

    async fn submit_deferred(
        &self,
        list: &ListController<R>,
        item: Item,
    ) -> Result<SubmitDisposition, SubmitTransport> {
        {
            let mut form = self.form.write().await;
            form.submitting = true;
            form.error = None;
        }

        let outcome = match self.repo.submit_item(&item).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.form.write().await.submitting = false;
                warn!(title = %item.title, %err, "submit transport failure");
                return Err(err);
            }
        };

        match outcome {
            SubmitOutcome::Accepted(confirmed) => {
                info!(title = %confirmed.title, "item confirmed");
                list.rewrite(|snapshot| reconcile::prepend_confirmed(snapshot, confirmed))
                    .await;
                *self.form.write().await = FormState::default();
                Ok(SubmitDisposition::Completed)
            }
            SubmitOutcome::Rejected { message } => {
                let mut form = self.form.write().await;
                form.submitting = false;
                form.error = Some(message.clone());
                Ok(SubmitDisposition::Rejected(message))
            }
        }
    }

    async fn submit_optimistic(
        &self,
        list: &ListController<R>,
        item: Item,
    ) -> Result<SubmitDisposition, SubmitTransport> {
        let title = item.title.clone();
        let provisional = item.clone();
        list.rewrite(|snapshot| reconcile::insert_pending(snapshot, provisional))
            .await;
        *self.form.write().await = FormState::default();

        match self.repo.submit_item(&item).await {
            Ok(SubmitOutcome::Accepted(confirmed)) => {
                info!(title = %confirmed.title, "provisional item confirmed");
                list.rewrite(|snapshot| reconcile::confirm_pending(snapshot, confirmed))
                    .await;
                Ok(SubmitDisposition::Completed)
            }
            Ok(SubmitOutcome::Rejected { message }) => {
                warn!(%title, %message, "provisional item rejected; rolling back");
                list.rewrite(|snapshot| reconcile::remove_pending(snapshot, &title))
                    .await;
                *self.notice.write().await = Some(message.clone());
                Ok(SubmitDisposition::Rejected(message))
            }
            Err(err) => {
                list.rewrite(|snapshot| reconcile::remove_pending(snapshot, &title))
                    .await;
                warn!(%title, %err, "submit transport failure; rolling back");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/submit_tests.rs"]
mod tests;
