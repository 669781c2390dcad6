//! The one place the Parser → Reader → Evaluator → printer pipeline is
//! wired (§10.3), shared by the REPL and the one-shot `run` CLI mode.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, instrument};

use crate::env::Environment;
use crate::eval::eval;
use crate::parser::parse_program;
use crate::reader::read;
use crate::value::Value;

/// Parses and evaluates every top-level form in `source` against `env` in
/// order, printing each result with `println!` (mirroring what the REPL
/// would show for each line). Returns `true` if a `Termination` value was
/// produced, so the caller can stop processing further input; returns an
/// `Err` only for a parse failure, which callers print as a diagnostic.
#[instrument(skip(env, source))]
pub fn evaluate_source(source: &str, env: &Rc<RefCell<Environment>>) -> Result<bool, String> {
    let ast = parse_program(source)?;
    for child in ast.children {
        let value = read(&child);
        let result = eval(env, value);
        println!("{result}");
        if matches!(result, Value::Termination) {
            info!("termination value produced, stopping evaluation");
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_and_prints_each_top_level_form() {
        let env = Environment::new_with_prelude();
        let stopped = evaluate_source("+ 1 2 3", &env).unwrap();
        assert!(!stopped);
    }

    #[test]
    fn exit_reports_termination() {
        let env = Environment::new_with_prelude();
        let stopped = evaluate_source("exit", &env).unwrap();
        assert!(stopped);
    }

    #[test]
    fn parse_error_is_surfaced_as_err() {
        let env = Environment::new_with_prelude();
        assert!(evaluate_source("(+ 1 2", &env).is_err());
    }

    #[test]
    fn global_env_persists_across_calls() {
        let env = Environment::new_with_prelude();
        evaluate_source("def {x} 41", &env).unwrap();
        let result = evaluate_source("+ x 1", &env);
        assert!(result.is_ok());
    }
}
