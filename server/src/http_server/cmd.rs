use tracing::{error, info};

use crate::{
    http_server::{routes, run_server},
    AppConfig, AppState, Result,
};

pub(crate) async fn serve() -> Result<()> {
    let app_config = AppConfig::from_env()?;

    info!(endpoint = %app_config.posts_endpoint, "Mounting home feed");
    let app_state = AppState::mount(app_config)?;
    let feed = app_state.feed.clone();
    let port = app_state.app.port;

    let result = run_server(
        routes::make_router().with_state(app_state),
        port,
        shutdown_signal(),
    )
    .await;

    feed.unmount();

    info!("Main Returning");

    result
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = ?err, "Failed to listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }

    info!("Shutdown signal received");
}
