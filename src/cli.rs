use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// A small interactive interpreter for the Lispy language.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(name = "lispy", bin_name = "lispy")]
pub struct Cli {
    /// Defaults to `repl` when no subcommand is given (§10.3).
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluates a Lisp expression from a string or executes a Lisp file.
    Run(RunArgs),
    /// Starts an interactive Read-Eval-Print Loop (REPL).
    Repl(ReplArgs),
}

#[derive(Args, Debug)]
pub struct ReplArgs {} // Empty for now, can add options later if needed

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Lisp expression string to evaluate.
    #[clap(short, long, value_name = "LISP_CODE", conflicts_with = "file")]
    pub expr: Option<String>,

    /// Path to a Lisp file to execute.
    #[clap(
        value_name = "FILE_PATH",
        conflicts_with = "expr",
        required_unless_present = "expr"
    )]
    pub file: Option<PathBuf>,
}
