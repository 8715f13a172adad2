use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::Item,
    error::{ApiError, ErrorCode},
};
use tracing::info;

mod config;
mod store;

use config::load_settings;
use store::ItemStore;

struct AppState {
    store: ItemStore,
    latency: Duration,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let store = if settings.seed_items {
        ItemStore::seeded()
    } else {
        ItemStore::new()
    };
    let state = AppState {
        store,
        latency: Duration::from_millis(settings.latency_ms),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "items backend listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/items", get(list_items).post(create_item))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_items(State(state): State<Arc<AppState>>) -> Json<Vec<Item>> {
    if !state.latency.is_zero() {
        // Artificial delay so client-side loading affordances stay
        // visible.
        tokio::time::sleep(state.latency).await;
    }
    Json(state.store.list().await)
}

type Rejection = (StatusCode, Json<ApiError>);

async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(item): Json<Item>,
) -> Result<Json<Item>, Rejection> {
    validate(&item)?;
    if item.title == "Whoopsies" {
        // Fixed failure fixture for exercising the rejection path.
        info!(title = %item.title, "rejecting failure-fixture item");
        return Err((
            StatusCode::BAD_GATEWAY,
            Json(ApiError::new(
                ErrorCode::Unavailable,
                "The server has gone away. Your favourite thing was not saved.",
            )),
        ));
    }
    state.store.insert_front(item.clone()).await;
    info!(title = %item.title, "item created");
    Ok(Json(item))
}

fn validate(item: &Item) -> Result<(), Rejection> {
    let missing = if item.title.trim().is_empty() {
        Some("title")
    } else if item.image_url.trim().is_empty() {
        Some("imageUrl")
    } else if item.image_alt.trim().is_empty() {
        Some("imageAlt")
    } else if item.description.iter().all(|p| p.trim().is_empty()) {
        Some("description")
    } else {
        None
    };

    match missing {
        Some(field) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::new(
                ErrorCode::Validation,
                format!("{field} must not be empty"),
            )),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
