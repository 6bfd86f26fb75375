/// Common test utilities for integration tests
///
/// Builds the full router over a fresh in-memory store and offers small
/// helpers for form posts, cookies and JSON bodies.

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use mifl_api::app::{build_router, AppState};
use mifl_api::config::Config;
use mifl_shared::store::{MemoryStore, Store};
use std::sync::Arc;
use tower::ServiceExt;

/// Test context containing the router and its store
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: Router,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config::in_memory();
        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn Store> = store.clone();
        let app = build_router(AppState::new(shared, config.clone()));

        TestContext { store, app, config }
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let body = serde_urlencoded::to_string(fields).unwrap();

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Registers an account with meeting count 3 and team number 5492
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Response<Body> {
        self.post_form(
            "/register",
            &[
                ("username", username),
                ("email", email),
                ("team_number", "5492"),
                ("meeting_count", "3"),
                ("password", password),
                ("confirm_password", password),
            ],
            None,
        )
        .await
    }

    /// Logs in and returns the `name=value` pair to send back as `Cookie`
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post_form("/login", &[("email", email), ("password", password)], None)
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        session_cookie(&response).expect("login should set the session cookie")
    }

    /// Registers and logs in, returning the session cookie
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> String {
        let response = self.register(username, email, password).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        self.login(email, password).await
    }
}

/// `name=value` of the first `Set-Cookie` header
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|pair| pair.trim().to_string())
}

/// Full `Set-Cookie` header, attributes included
pub fn set_cookie_header(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
