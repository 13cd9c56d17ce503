use axum::extract::State;
use maud::{html, Markup};

use crate::{
    feed::{FeedSnapshot, HomeFeed},
    http_server::{
        components::pending_refresh::PendingRefresh,
        templates::{base, posts::PostGrid, Banner, LoggedInNavbar},
        trace::FEED_PHASE_FIELD,
    },
    AppConfig,
};

const PENDING_REFRESH_SECONDS: u32 = 2;

pub(crate) async fn home_page(
    State(app): State<AppConfig>,
    State(feed): State<HomeFeed>,
) -> Markup {
    let snapshot = feed.snapshot();
    tracing::Span::current().record(FEED_PHASE_FIELD, snapshot.phase.as_str());

    render_home(&app.viewer_name, &snapshot)
}

pub(crate) fn render_home(viewer: &str, feed: &FeedSnapshot) -> Markup {
    base(html! {
        (LoggedInNavbar)

        div {
            (Banner { viewer })

            (PostGrid(&feed.posts))

            @if feed.is_pending() {
                (PendingRefresh::new("#post-grid").with_interval(PENDING_REFRESH_SECONDS))
            }
        }
    })
}
