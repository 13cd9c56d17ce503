use axum::{http::header, routing::get, Router};

use super::{pages, HOME_STYLES};
use crate::AppState;

pub(crate) fn make_router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home::home_page))
        .route(
            "/styles/home.css",
            get(|| async { ([(header::CONTENT_TYPE, "text/css")], HOME_STYLES) }),
        )
}
