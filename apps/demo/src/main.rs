use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    HttpItemRepository, ListController, SubmissionController, SubmitDisposition, SubmitPolicy,
};
use shared::domain::Item;

/// Lists the favourite things on a running items backend and optionally
/// submits a new one.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8080/api")]
    server_url: String,
    /// Reconcile the new item optimistically instead of waiting for
    /// confirmation.
    #[arg(long)]
    optimistic: bool,
    /// Title of an item to submit after listing.
    #[arg(long, requires = "image_url", requires = "image_alt", requires = "paragraph")]
    title: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long)]
    image_alt: Option<String>,
    /// Description paragraph; repeat for multiple paragraphs.
    #[arg(long)]
    paragraph: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let repo = Arc::new(HttpItemRepository::new(&args.server_url));
    let list = ListController::new(repo.clone());
    list.load().await?;

    println!("Favourite things at {}:", args.server_url);
    for entry in list.snapshot().await {
        println!("  - {}", entry.item.title);
    }

    let Some(title) = args.title else {
        return Ok(());
    };
    let item = Item::new(
        title,
        args.paragraph,
        args.image_url.unwrap_or_default(),
        args.image_alt.unwrap_or_default(),
    );

    let policy = if args.optimistic {
        SubmitPolicy::Optimistic
    } else {
        SubmitPolicy::Deferred
    };
    let submission = SubmissionController::new(repo, policy);
    submission.open_form().await;

    match submission.submit(&list, item).await? {
        SubmitDisposition::Completed => {
            println!("Saved. The list is now:");
            for entry in list.snapshot().await {
                println!("  - {}", entry.item.title);
            }
        }
        SubmitDisposition::Rejected(message) => bail!("submit rejected: {message}"),
        SubmitDisposition::AlreadyPending => unreachable!("single submission"),
    }

    Ok(())
}
