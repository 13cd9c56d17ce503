use crate::{AppConfig, Result};

pub(crate) fn validate() -> Result<()> {
    let config = AppConfig::from_env()?;

    println!("Posts endpoint: {}", config.posts_endpoint);
    println!("Viewer: {}", config.viewer_name);
    println!("Port: {}", config.port);
    println!("Posts timeout: {}s", config.posts_timeout.as_secs());
    println!("Config Valid! ✅");

    Ok(())
}
