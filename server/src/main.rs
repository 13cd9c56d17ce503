use clap::Parser;
use commands::Command;

pub use color_eyre::Result;

mod commands;

mod feed;

mod http_server;

pub(crate) mod state;
pub(crate) use state::{AppConfig, AppState};

#[cfg(test)]
mod test_helpers;

#[derive(Parser)]
#[command(author, version, about)]
struct CliArgs {
    #[clap(subcommand)]
    command: Option<Command>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let _sentry_guard = tracing_common::setup_sentry();

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()?
        .block_on(async { _main().await })
}

async fn _main() -> Result<()> {
    tracing_common::setup_tracing("intronus")?;

    let cli = CliArgs::parse();
    let command = cli.command.unwrap_or_default();

    command.run().await
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn serves_by_default() {
        let cli = CliArgs::try_parse_from(["intronus"]).unwrap();

        assert!(matches!(cli.command.unwrap_or_default(), Command::Serve));
    }

    #[test]
    fn parses_render() {
        let cli = CliArgs::try_parse_from(["intronus", "render"]).unwrap();

        assert!(matches!(cli.command, Some(Command::Render)));
    }
}
