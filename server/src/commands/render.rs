use crate::{http_server::pages::home::render_home, AppConfig, AppState, Result};

pub(crate) async fn render() -> Result<()> {
    let app_state = AppState::mount(AppConfig::from_env()?)?;

    let snapshot = app_state.feed.resolved().await;
    app_state.feed.unmount();

    println!(
        "{}",
        render_home(&app_state.app.viewer_name, &snapshot).into_string()
    );

    Ok(())
}
