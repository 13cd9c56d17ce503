use clap::Subcommand;

use crate::Result;

pub(crate) mod render;
pub(crate) mod validate;

#[derive(Subcommand, Default)]
pub(crate) enum Command {
    /// Mount the home feed and serve it over HTTP
    #[default]
    Serve,
    /// Mount the home feed once, wait for it and print the page
    Render,
    /// Check the configuration from the environment
    Validate,
}

impl Command {
    pub(crate) async fn run(&self) -> Result<()> {
        match &self {
            Command::Serve => crate::http_server::cmd::serve().await,
            Command::Render => render::render().await,
            Command::Validate => validate::validate(),
        }
    }
}
