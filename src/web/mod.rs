use crate::db::Database;
use axum::{Router, routing::get};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared application state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
}

mod errors;
mod handlers;

pub use errors::AppError;

/// Build the axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/tasks/{id}",
            get(handlers::get_task)
                .put(handlers::replace_task)
                .delete(handlers::delete_task),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the reference backend on the given port.
pub async fn serve(db_path: &std::path::Path, port: u16) -> Result<(), String> {
    let db = Database::open(db_path)?;
    db.migrate()?;
    let state = AppState {
        db: Arc::new(Mutex::new(db)),
    };
    let app = create_router(state);
    let addr = format!("127.0.0.1:{port}");
    println!("taskedit API: http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("failed to bind to {addr}: {e}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("server error: {e}"))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
