use axum::response::Html;
use axum::{
    extract::Extension,
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use warehouse_inventory::api::handlers::{
    handle_create_item, handle_delete_item, handle_list_items, handle_update_item,
};
use warehouse_inventory::store::persisted::PersistedStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = "0.0.0.0:3000".parse()?;
    let mut db_path = PathBuf::from("db.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            "--db" => {
                db_path = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    // 1. Persistence core (creates the backing file on first start):
    let store = Arc::new(PersistedStore::open(&db_path));
    tracing::info!("Backing file: {}", store.path().display());

    // 2. HTTP Router:
    let app = Router::new()
        .route("/", get(ui))
        .route("/api/items", get(handle_list_items).post(handle_create_item))
        .route(
            "/api/items/:id",
            put(handle_update_item).delete(handle_delete_item),
        )
        .fallback(get(ui))
        .layer(Extension(store.clone()));

    // 3. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on http://{}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 4. Final flush attempt before teardown:
    if store.flush() {
        tracing::info!("Shutdown complete");
    } else {
        tracing::error!("Final flush failed; latest state may not be on disk");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}

/// Embedded single-page UI, also served as the SPA fallback for unknown
/// paths.
async fn ui() -> Html<&'static str> {
    Html(include_str!("ui.html"))
}
