//=====================================================
// File: repl.rs
//=====================================================
// Author: SolvraOS Contributors
// License: Duality Public License (DPL v1.0)
// Goal: Interactive prompt and source executor for Code-Lang
// Objective: Drive the lex/parse/check/eval pipeline for the REPL and
//            the file runner, with a persistent environment per session
//=====================================================

use crate::evaluator::Evaluator;
use crate::object::{Environment, Value};
use crate::parser::{ParseError, Parser};
use crate::symbol;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub const PROMPT: &str = ">> ";

/// Line-based REPL. The environment, the evaluator and its module
/// cache persist across lines; `exit()` terminates.
pub fn start() -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let env = Environment::new();
    let mut evaluator = Evaluator::new();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "exit()" {
                    break;
                }
                let _ = editor.add_history_entry(trimmed);

                let mut parser = Parser::from_source(&line);
                let program = parser.parse_program();
                if !parser.errors().is_empty() {
                    print_parser_errors(parser.errors());
                    continue;
                }

                for diagnostic in symbol::builder::check(&program) {
                    println!("{}", diagnostic);
                }

                match evaluator.eval_program(&program, &env) {
                    Ok(Some(value)) if value != Value::Null => println!("{}", value),
                    Ok(_) => {}
                    Err(error) => println!("{}", error),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Execute a whole source text, printing the result or the error.
/// Returns false when parse errors, symbol diagnostics or a runtime
/// error mean the run failed.
pub fn execute(source: &str) -> bool {
    let mut parser = Parser::from_source(source);
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        print_parser_errors(parser.errors());
        return false;
    }

    let diagnostics = symbol::builder::check(&program);
    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic);
    }

    let env = Environment::new();
    let mut evaluator = Evaluator::new();
    match evaluator.eval_program(&program, &env) {
        Ok(result) => {
            if let Some(value) = result {
                if value != Value::Null {
                    println!("{}", value);
                }
            }
            diagnostics.is_empty()
        }
        Err(error) => {
            println!("{}", error);
            false
        }
    }
}

fn print_parser_errors(errors: &[ParseError]) {
    println!("Whoops! We ran into some Code-Lang business!");
    println!(" parser errors:");
    for error in errors {
        println!("\t{}", error);
    }
}
