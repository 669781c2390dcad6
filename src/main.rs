mod apply;
mod ast;
mod builtins;
mod cli;
mod driver;
mod env;
mod error;
mod eval;
mod logging;
mod parser;
mod reader;
mod repl;
mod value;

#[cfg(test)]
mod test_utils;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{Cli, Commands, RunArgs};
use crate::driver::evaluate_source;
use crate::env::Environment;

fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    match cli.command {
        None | Some(Commands::Repl(_)) => {
            let env = Environment::new_with_prelude();
            repl::start_repl(env)
        }
        Some(Commands::Run(args)) => run(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let env = Environment::new_with_prelude();

    let source = match (&args.expr, &args.file) {
        (Some(expr), _) => expr.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("could not read script file '{}'", path.display()))?,
        (None, None) => unreachable!("clap enforces expr xor file"),
    };

    evaluate_source(&source, &env).map_err(|parse_err| anyhow::anyhow!(parse_err))?;
    Ok(())
}
