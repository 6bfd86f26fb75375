/// Session cookie middleware
///
/// Two layers work together:
///
/// - [`resolve_session`] wraps the whole router. It reads the session cookie
///   once per request, resolves it to a user and stores the result in the
///   request extensions as [`MaybeUser`] (always) and [`CurrentUser`] (only
///   when signed in).
/// - [`require_session`] is a `route_layer` on guarded routes. Anonymous
///   visitors are redirected to `/login?next=<original path>`.
///
/// Handlers then take `Extension<CurrentUser>` and pass the identity down
/// explicitly.

use crate::{app::AppState, config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use mifl_shared::{auth::session, models::user::User};
use tracing::debug;

/// The signed-in user on a guarded route
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The signed-in user, if any, on every route
#[derive(Debug, Clone, Default)]
pub struct MaybeUser(pub Option<User>);

/// Resolves the session cookie into request extensions
pub async fn resolve_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = match jar.get(&state.config.session.cookie_name) {
        Some(cookie) => session::current_user(state.store.as_ref(), cookie.value()).await?,
        None => None,
    };

    if let Some(user) = &user {
        debug!(user_id = user.id, "Session resolved");
        req.extensions_mut().insert(CurrentUser(user.clone()));
    }
    req.extensions_mut().insert(MaybeUser(user));

    Ok(next.run(req).await)
}

/// Gate for routes that need a signed-in user
pub async fn require_session(req: Request, next: Next) -> Response {
    if req.extensions().get::<CurrentUser>().is_some() {
        return next.run(req).await;
    }

    let original = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    debug!(path = original, "Anonymous request to guarded route");
    Redirect::to(&login_redirect(original)).into_response()
}

/// `/login?next=...` for a path the visitor tried to reach
pub fn login_redirect(original: &str) -> String {
    match serde_urlencoded::to_string([("next", original)]) {
        Ok(query) => format!("/login?{}", query),
        Err(_) => "/login".to_string(),
    }
}

/// Cookie carrying a freshly issued session token
///
/// "Remember me" logins get a persistent cookie; others end with the browser
/// session.
pub fn session_cookie(config: &Config, token: String, remember: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((config.session.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.api.production)
        .build();

    if remember {
        cookie.set_max_age(time::Duration::days(config.session.remember_days));
    }

    cookie
}

/// Cookie that clears the session cookie in the browser
pub fn removal_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((config.session.cookie_name.clone(), ""))
        .path("/")
        .build()
}
