/// Page payloads
///
/// Pages are not rendered server-side. A handler returns the template name,
/// the page title and the template context as one flat JSON object:
///
/// ```json
/// { "template": "post.html", "title": "p1", "post": { ... } }
/// ```

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// A page to be rendered by the front end
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub template: &'static str,

    pub title: String,

    #[serde(flatten)]
    pub context: T,
}

/// Context for pages that need nothing beyond a title
#[derive(Debug, Default, Serialize)]
pub struct NoContext {}

/// Context for an empty create form: just its heading
#[derive(Debug, Serialize)]
pub struct LegendContext {
    pub legend: &'static str,
}

impl Page<NoContext> {
    pub fn plain(template: &'static str, title: impl Into<String>) -> Self {
        Page::new(template, title, NoContext {})
    }
}

impl<T: Serialize> Page<T> {
    pub fn new(template: &'static str, title: impl Into<String>, context: T) -> Self {
        Self {
            template,
            title: title.into(),
            context,
        }
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
