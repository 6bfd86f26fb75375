/// Engineering notebook endpoints
///
/// # Endpoints
///
/// - `GET /notebook` - All posts (public)
/// - `GET /post/:id` - One post (public)
/// - `GET,POST /post/new` - Write a post as the signed-in user
/// - `GET,POST /post/:id/update` - Edit a post (author only)
/// - `POST /post/:id/delete` - Delete a post (author only)
///
/// # Errors
///
/// - `404 Not Found`: No post with that ID, or an ID that is not a number
/// - `403 Forbidden`: Signed-in user is not the post's author; the post is
///   left untouched

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    forms::PostForm,
    middleware::session::CurrentUser,
    pages::{LegendContext, Page},
};
use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form,
};
use axum_extra::extract::WithRejection;
use mifl_shared::{
    models::post::{PostId, PostWithAuthor},
    notebook,
};
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct NotebookContext {
    pub posts: Vec<PostWithAuthor>,
}

#[derive(Debug, Serialize)]
pub struct PostContext {
    pub post: PostWithAuthor,
}

/// Post form pre-filled for editing
#[derive(Debug, Serialize)]
pub struct EditPostContext {
    pub legend: &'static str,
    pub title: String,
    pub content: String,
}

pub async fn notebook(State(state): State<AppState>) -> ApiResult<Page<NotebookContext>> {
    let posts = notebook::list_all(state.store.as_ref()).await?;

    Ok(Page::new("notebook.html", "Notebook", NotebookContext { posts }))
}

pub async fn show_post(
    State(state): State<AppState>,
    WithRejection(Path(post_id), _): WithRejection<Path<PostId>, ApiError>,
) -> ApiResult<Page<PostContext>> {
    let post = notebook::get(state.store.as_ref(), post_id).await?;

    Ok(Page::new("post.html", post.title.clone(), PostContext { post }))
}

pub async fn new_post_page() -> Page<LegendContext> {
    Page::new("create_post.html", "New Post", LegendContext { legend: "New Post" })
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    WithRejection(Form(form), _): WithRejection<Form<PostForm>, ApiError>,
) -> ApiResult<Redirect> {
    form.validate()?;

    notebook::create(state.store.as_ref(), &form.title, &form.content, user.id).await?;

    Ok(Redirect::to("/notebook"))
}

/// Edit form; non-authors are refused before seeing it
pub async fn update_post_page(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    WithRejection(Path(post_id), _): WithRejection<Path<PostId>, ApiError>,
) -> ApiResult<Page<EditPostContext>> {
    let post = notebook::authorize(state.store.as_ref(), post_id, user.id).await?;

    Ok(Page::new(
        "create_post.html",
        "Update Post",
        EditPostContext {
            legend: "Update Post",
            title: post.title,
            content: post.content,
        },
    ))
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    WithRejection(Path(post_id), _): WithRejection<Path<PostId>, ApiError>,
    WithRejection(Form(form), _): WithRejection<Form<PostForm>, ApiError>,
) -> ApiResult<Redirect> {
    // Ownership first: a non-author gets 403 even with an invalid form
    notebook::authorize(state.store.as_ref(), post_id, user.id).await?;
    form.validate()?;

    notebook::update(
        state.store.as_ref(),
        post_id,
        &form.title,
        &form.content,
        user.id,
    )
    .await?;

    Ok(Redirect::to(&format!("/post/{}", post_id)))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    WithRejection(Path(post_id), _): WithRejection<Path<PostId>, ApiError>,
) -> ApiResult<Redirect> {
    notebook::delete(state.store.as_ref(), post_id, user.id).await?;

    Ok(Redirect::to("/notebook"))
}
