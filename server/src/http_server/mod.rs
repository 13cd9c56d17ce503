use std::{future::Future, net::SocketAddr};

use axum::Router;
use color_eyre::eyre::WrapErr;
use tokio::net::TcpListener;

use crate::Result;

pub(crate) mod cmd;
pub(crate) mod routes;

pub(crate) mod pages {
    pub mod home;
}

pub(crate) mod components {
    pub mod pending_refresh;
}

mod templates;
mod trace;

const HOME_STYLES: &str = include_str!("../../static/home.css");

pub(crate) async fn run_server(
    routes: Router,
    port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http()
        .make_span_with(trace::Tracer)
        .on_response(trace::Tracer);

    let app = routes.layer(trace_layer);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on port {}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err("Failed to open port")?;

    let addr = listener.local_addr()?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .wrap_err("Failed to run server")
}
