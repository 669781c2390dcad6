pub mod highlighter;
pub mod history;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use rustyline::history::DefaultHistory;
use tracing::info;

use crate::driver::evaluate_source;
use crate::env::Environment;
use crate::repl::highlighter::ReplHelper;
use crate::repl::history::{get_history_path, load_history_from_path, save_history_to_path};

const PROMPT: &str = "clisp> ";

/// Drives the §6 REPL loop: read a line, parse, read into a `Value`, eval,
/// print. A `Termination` value breaks the loop; parse errors are printed
/// and the loop continues.
#[tracing::instrument(skip(env))]
pub fn start_repl(env: Rc<RefCell<Environment>>) -> Result<()> {
    info!("starting REPL session");
    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    let history_path = get_history_path();
    if let Some(path) = &history_path {
        load_history_from_path(&mut rl, path);
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str()).ok();

                match evaluate_source(&line, &env) {
                    Ok(stopped) => {
                        if stopped {
                            break;
                        }
                    }
                    Err(parse_err) => eprintln!("{parse_err}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C aborts the current line; it does not exit (§6).
                continue;
            }
            Err(ReadlineError::Eof) => {
                info!("EOF on stdin, exiting");
                break;
            }
            Err(err) => {
                eprintln!("readline error: {err}");
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        save_history_to_path(&mut rl, path);
    }
    Ok(())
}
