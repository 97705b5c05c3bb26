mod cli;
mod commands;


use clap::Parser;

use cli::{Cli, Command};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Search { dump, origin } => commands::search::run(&dump, origin),
        Command::Stats { dump } => commands::stats::run(&dump),
    }
}
