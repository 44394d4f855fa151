//! titlematch - typo-tolerant fuzzy search over post titles
//!
//! Thin command-line front end over the `titlematch` library.

mod cli;
mod commands;
mod config;
mod input;
mod output;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::RuntimeContext;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr(), "Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = RuntimeContext::new(&cli.global)?;
    ctx.init_logging()?;

    log::debug!("Config loaded from: {:?}", ctx.config_path());

    run_command(&ctx, cli.command)
}

fn run_command(ctx: &RuntimeContext, command: Command) -> Result<()> {
    match command {
        Command::Search(cmd) => commands::search::run(ctx, cmd),
        Command::Similarity { source, target } => commands::similarity::run(ctx, &source, &target),
        Command::Config { command } => commands::config::run(ctx, command),
        Command::Completions { shell } => commands::completions::run(shell),
    }
}
