/// Account endpoints (signed-in only)
///
/// # Endpoints
///
/// - `GET /account` - Profile page with the form pre-filled
/// - `GET /update` - Stand-alone profile form
/// - `POST /account`, `POST /update` - Change username and email, then go
///   to `/account`

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    forms::AccountForm,
    middleware::session::CurrentUser,
    pages::Page,
};
use axum::{extract::State, response::Redirect, Extension, Form};
use axum_extra::extract::WithRejection;
use mifl_shared::accounts;
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct AccountContext {
    pub username: String,
    pub email: String,
    pub image_file: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateContext {
    pub username: String,
    pub email: String,
}

pub async fn account_page(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Page<AccountContext> {
    Page::new(
        "account.html",
        "Account",
        AccountContext {
            username: user.username,
            email: user.email,
            image_file: user.image_file,
        },
    )
}

pub async fn update_page(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Page<UpdateContext> {
    Page::new(
        "update.html",
        "Update",
        UpdateContext {
            username: user.username,
            email: user.email,
        },
    )
}

/// Updates the signed-in user's username and email
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed, or the new username or
///   email belongs to someone else
pub async fn update_account(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    WithRejection(Form(form), _): WithRejection<Form<AccountForm>, ApiError>,
) -> ApiResult<Redirect> {
    form.validate()?;

    accounts::update_profile(state.store.as_ref(), user.id, &form.username, &form.email).await?;

    Ok(Redirect::to("/account"))
}
