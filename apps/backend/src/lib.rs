pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::db::Database;
use michi_core::{UndoBuffer, UndoRecord};

/// Per-user single-slot undo buffers. Ephemeral: slots live in process
/// memory and do not survive a restart.
#[derive(Default)]
pub struct UndoSlots {
    slots: Mutex<HashMap<Uuid, UndoBuffer>>,
}

impl UndoSlots {
    /// Arm a user's slot, replacing any prior record.
    pub fn arm(&self, user_id: Uuid, record: UndoRecord) {
        let mut slots = self.slots.lock().expect("undo slots poisoned");
        slots.entry(user_id).or_default().arm(record);
    }

    /// The user's armed record if it is still inside the undo window.
    pub fn fresh(&self, user_id: Uuid, now: DateTime<Utc>) -> Option<UndoRecord> {
        let slots = self.slots.lock().expect("undo slots poisoned");
        slots.get(&user_id).and_then(|b| b.fresh(now)).cloned()
    }

    /// Consume the slot after a successful compensating action.
    pub fn disarm(&self, user_id: Uuid) {
        let mut slots = self.slots.lock().expect("undo slots poisoned");
        if let Some(buffer) = slots.get_mut(&user_id) {
            buffer.disarm();
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub undo: Arc<UndoSlots>,
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState {
        db: Arc::new(db),
        undo: Arc::new(UndoSlots::default()),
    };

    let app = build_router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the full router with all routes and layers.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Account routes
        .route("/api/account/status", get(routes::account::status))
        // Progress routes
        .route("/api/progress/log", post(routes::progress::log))
        .route("/api/progress/undo", post(routes::progress::undo))
        .route("/api/progress/today", get(routes::progress::today))
        .route("/api/progress", get(routes::progress::list))
        // Score routes
        .route("/api/scores", post(routes::scores::log))
        .route("/api/scores", get(routes::scores::list))
        .route("/api/scores/{id}", delete(routes::scores::delete))
        // Profile routes
        .route("/api/profile", get(routes::profile::get))
        .route("/api/profile", put(routes::profile::update))
        .route("/api/badges", get(routes::profile::badges))
        // Analytics routes
        .route("/api/analytics", get(routes::analytics::summary))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/account/register", post(routes::account::register))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
