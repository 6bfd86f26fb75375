/// Task board endpoints (signed-in only)
///
/// # Endpoints
///
/// - `GET /tasks` - Every task, oldest first, with the viewer's meeting count
/// - `GET,POST /task/new` - Add a task, then go to `/home`

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    forms::TaskForm,
    middleware::session::CurrentUser,
    pages::{LegendContext, Page},
};
use axum::{extract::State, response::Redirect, Extension, Form};
use axum_extra::extract::WithRejection;
use mifl_shared::{board, models::task::{CreateTask, Task}};
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct TasksContext {
    pub tasks: Vec<Task>,
    pub num_rows: usize,
    pub num_mtgs: i32,
}

pub async fn tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Page<TasksContext>> {
    let tasks = board::list_all(state.store.as_ref()).await?;

    Ok(Page::new(
        "tasks.html",
        "Tasks",
        TasksContext {
            num_rows: tasks.len(),
            num_mtgs: user.meeting_count,
            tasks,
        },
    ))
}

pub async fn new_task_page() -> Page<LegendContext> {
    Page::new("create_task.html", "New Task", LegendContext { legend: "New Task" })
}

pub async fn create_task(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<TaskForm>, ApiError>,
) -> ApiResult<Redirect> {
    form.validate()?;

    board::create(
        state.store.as_ref(),
        CreateTask {
            category: form.category,
            title: form.title,
            content: form.content,
        },
    )
    .await?;

    Ok(Redirect::to("/home"))
}
