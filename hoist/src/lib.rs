pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod registry;
pub mod util;
pub mod validate;

use cli::Cli;
use config::Config;
use error::Result;
use tracing::info;
use util::CommandRunner;

/// Loads the config, selects and validates the profile, then publishes it.
pub fn run(cli: &Cli, runner: &mut impl CommandRunner) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let profile = config.profile(&cli.profile)?;
    info!(name = %cli.profile, ?profile, "loaded configuration");

    validate::validate(profile)?;
    commands::publish::publish(profile, runner)
}
