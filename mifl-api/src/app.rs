/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use mifl_api::{app::{build_router, AppState}, config::Config};
/// use mifl_shared::store::MemoryStore;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let state = AppState::new(Arc::new(MemoryStore::new()), Config::in_memory());
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{
        security::SecurityHeadersLayer,
        session::{require_session, resolve_session},
    },
    routes,
};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use mifl_shared::{auth::session::SessionPolicy, store::Store};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Backing store (Postgres in production, in-memory for tests)
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Session lifetimes derived from configuration
    pub fn session_policy(&self) -> SessionPolicy {
        self.config.session.policy()
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── public
/// │   ├── GET  /, /home, /about, /tools, /timer, /scorer, /links
/// │   ├── GET  /health
/// │   ├── GET,POST /register, /login
/// │   ├── GET  /logout
/// │   ├── GET  /notebook
/// │   └── GET  /post/:id
/// └── signed-in only (anonymous -> /login?next=...)
///     ├── GET,POST /account, /update
///     ├── GET  /tasks
///     ├── GET,POST /task/new
///     ├── GET,POST /post/new
///     ├── GET,POST /post/:id/update   (author only)
///     └── POST /post/:id/delete       (author only)
/// ```
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. Security headers
/// 2. Logging (tower-http TraceLayer)
/// 3. Session resolution (every route)
/// 4. Sign-in gate (guarded routes only)
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(routes::site::home))
        .route("/home", get(routes::site::home))
        .route("/about", get(routes::site::about))
        .route("/tools", get(routes::site::tools))
        .route("/timer", get(routes::site::timer))
        .route("/scorer", get(routes::site::scorer))
        .route("/links", get(routes::site::links))
        .route("/health", get(routes::health::health_check))
        .route(
            "/register",
            get(routes::auth::register_page).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route("/logout", get(routes::auth::logout))
        .route("/notebook", get(routes::notebook::notebook))
        .route("/post/:post_id", get(routes::notebook::show_post));

    let guarded_routes = Router::new()
        .route(
            "/account",
            get(routes::account::account_page).post(routes::account::update_account),
        )
        .route(
            "/update",
            get(routes::account::update_page).post(routes::account::update_account),
        )
        .route("/tasks", get(routes::tasks::tasks))
        .route(
            "/task/new",
            get(routes::tasks::new_task_page).post(routes::tasks::create_task),
        )
        .route(
            "/post/new",
            get(routes::notebook::new_post_page).post(routes::notebook::create_post),
        )
        .route(
            "/post/:post_id/update",
            get(routes::notebook::update_post_page).post(routes::notebook::update_post),
        )
        .route("/post/:post_id/delete", post(routes::notebook::delete_post))
        .route_layer(from_fn(require_session));

    Router::new()
        .merge(public_routes)
        .merge(guarded_routes)
        .layer(from_fn_with_state(state.clone(), resolve_session))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
