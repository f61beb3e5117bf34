//! HTTP front end serving the card table.
//!
//! Every request, whatever its method or path, reaches [`table_handler`]. A
//! failed search is logged and rendered as an empty table, so the client
//! always receives `200 OK`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::State, response::Html, routing::any, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::client::{Card, CardFilter, CatalogClient};
use crate::template;

#[derive(Clone)]
pub struct AppState {
    client: Arc<CatalogClient>,
    filter: Arc<CardFilter>,
    template_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(client: CatalogClient, template_path: PathBuf) -> Self {
        Self::with_filter(Arc::new(client), CardFilter::default(), template_path)
    }

    pub fn with_filter(client: Arc<CatalogClient>, filter: CardFilter, template_path: PathBuf) -> Self {
        Self {
            client,
            filter: Arc::new(filter),
            template_path: Arc::new(template_path),
        }
    }
}

/// Sorts cards by ascending ID, keeping the order of equal IDs.
pub fn sort_by_id(cards: &mut [Card]) {
    cards.sort_by_key(|card| card.id);
}

pub async fn table_handler(State(state): State<AppState>) -> Html<String> {
    let mut cards = match state.client.search_filter(&state.filter).await {
        Ok(cards) => cards,
        Err(e) => {
            tracing::error!("Hearthstone card search failed: {:#}", e);
            Vec::new()
        }
    };

    tracing::info!("Fetched {} cards for table request", cards.len());
    sort_by_id(&mut cards);

    let page = match template::load_template(&state.template_path).await {
        Ok(source) => template::render_table(&source, &cards),
        Err(e) => Err(e),
    };

    match page {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::error!("Rendering card table failed: {:#}", e);
            Html(String::new())
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(table_handler))
        .fallback(table_handler)
        .with_state(state)
}

/// Serves the table on `listener` until `ct` is cancelled.
pub async fn serve(listener: TcpListener, state: AppState, ct: CancellationToken) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await?;
    Ok(())
}
