/// Authentication endpoints
///
/// # Endpoints
///
/// - `GET,POST /register` - Create an account, then go to `/login`
/// - `GET,POST /login` - Open a session, then go to `next` or `/home`
/// - `GET /logout` - End the session, then go to `/home`
///
/// Visitors who are already signed in are sent to `/home` by both
/// `/register` and `/login`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    forms::{local_redirect_target, LoginForm, NextQuery, RegisterForm},
    middleware::session::{removal_cookie, session_cookie, MaybeUser},
    pages::Page,
};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::{extract::cookie::CookieJar, extract::WithRejection};
use mifl_shared::{
    accounts::{self, NewAccount},
    auth::session,
};
use validator::Validate;

/// Register page
pub async fn register_page(Extension(MaybeUser(user)): Extension<MaybeUser>) -> Response {
    if user.is_some() {
        return Redirect::to("/home").into_response();
    }

    Page::plain("register.html", "Register").into_response()
}

/// Creates an account
///
/// # Errors
///
/// - `400 Bad Request`: Body is not a urlencoded form
/// - `422 Unprocessable Entity`: Validation failed, or username/email taken
pub async fn register(
    State(state): State<AppState>,
    Extension(MaybeUser(user)): Extension<MaybeUser>,
    WithRejection(Form(form), _): WithRejection<Form<RegisterForm>, ApiError>,
) -> ApiResult<Redirect> {
    if user.is_some() {
        return Ok(Redirect::to("/home"));
    }

    form.validate()?;
    accounts::register(state.store.as_ref(), NewAccount::try_from(form)?).await?;

    Ok(Redirect::to("/login"))
}

/// Login page
pub async fn login_page(Extension(MaybeUser(user)): Extension<MaybeUser>) -> Response {
    if user.is_some() {
        return Redirect::to("/home").into_response();
    }

    Page::plain("login.html", "Login").into_response()
}

/// Opens a session and sets the session cookie
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password
/// - `422 Unprocessable Entity`: Validation failed
pub async fn login(
    State(state): State<AppState>,
    Extension(MaybeUser(user)): Extension<MaybeUser>,
    Query(query): Query<NextQuery>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<LoginForm>, ApiError>,
) -> ApiResult<(CookieJar, Redirect)> {
    if user.is_some() {
        return Ok((jar, Redirect::to("/home")));
    }

    form.validate()?;
    let remember = form.remembered();

    let issued = session::login(
        state.store.as_ref(),
        &form.email,
        &form.password,
        remember,
        &state.session_policy(),
    )
    .await?;

    let jar = jar.add(session_cookie(&state.config, issued.token, remember));
    let target = local_redirect_target(query.next.as_deref());

    Ok((jar, Redirect::to(target)))
}

/// Ends the session; harmless when not signed in
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Redirect)> {
    if let Some(cookie) = jar.get(&state.config.session.cookie_name) {
        session::logout(state.store.as_ref(), cookie.value()).await?;
    }

    Ok((jar.remove(removal_cookie(&state.config)), Redirect::to("/home")))
}
