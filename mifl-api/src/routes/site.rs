/// Static site pages
///
/// Landing page, about page and the utility pages (match timer, scorer and
/// link list). None of them need a session; the front end renders them from
/// the template name alone.

use crate::pages::{NoContext, Page};

pub async fn home() -> Page<NoContext> {
    Page::plain("home.html", "Home")
}

pub async fn about() -> Page<NoContext> {
    Page::plain("about.html", "About")
}

pub async fn tools() -> Page<NoContext> {
    Page::plain("tools.html", "Tools")
}

pub async fn timer() -> Page<NoContext> {
    Page::plain("timer.html", "Timer")
}

pub async fn scorer() -> Page<NoContext> {
    Page::plain("scorer.html", "Scorer")
}

pub async fn links() -> Page<NoContext> {
    Page::plain("links.html", "Links")
}
