mod cli;
mod config;
mod error;
mod init;
mod logging;
mod prompts;
mod tools;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use error::Result;
use std::process;

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("{} {}", "Error:".bold().red(), err.user_message());
            process::exit(1);
        }
    }
}

/// Run the selected command; `Ok(false)` means it finished with an error output.
///
/// Only `call` reads the configuration. Every command installs logging before it can
/// return an error, so a configuration failure is logged like any other.
fn run(cli: Cli) -> Result<bool> {
    let log_level = cli.log_level.as_deref();

    match cli.command {
        Commands::Call { tool, args } => {
            let config = config::load(cli.config);
            let configured_level = config.as_ref().ok().map(|c| c.logging.level.as_str());
            logging::init(log_level, configured_level);
            tools::call(config?, &tool, &args)
        }
        Commands::Init { path, force } => {
            logging::init(log_level, None);
            init::execute(&path, force).map(|_| true)
        }
        Commands::Tools => {
            logging::init(log_level, None);
            tools::list().map(|_| true)
        }
        Commands::Prompts => {
            logging::init(log_level, None);
            prompts::list().map(|_| true)
        }
        Commands::Render { prompt, args } => {
            logging::init(log_level, None);
            prompts::render(&prompt, args).map(|_| true)
        }
    }
}
