//! A tree-walk interpreter for Lox, a small dynamically typed scripting
//! language with classes, single inheritance, first-class functions and
//! lexical closures, as defined by the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book.
//!
//! Source text moves through four stages, each running to completion before
//! the next begins:
//!
//! 1. The [`scanner`](scanner) turns characters into [`tokens`](token),
//!    reporting lexical errors per line and always terminating the stream
//!    with a single `EOF`.
//! 2. The [`parser`](parser) builds [`expressions`](expr) and
//!    [`statements`](stmt) by recursive descent, synchronizing at statement
//!    boundaries after an error so one run can report several.
//! 3. The [`resolver`](resolver) is a static pre-pass that records, for
//!    every variable reference, how many environments out its binding lives.
//!    That side table is keyed by the identity of the referencing expression,
//!    which is what makes shadowing and closures capture the right binding
//!    no matter how often a name is reused.
//! 4. The [`interpreter`](interpreter) walks the tree against a chain of
//!    [`environments`](environment), enforcing the runtime type rules and
//!    threading `return` back to the nearest call boundary.
//!
//! A static error stops the pipeline before the next stage; a runtime error
//! unwinds to the driver. [`Lox`] glues the stages together, owns the error
//! flags for one run and exposes the file and REPL entry points used by the
//! `lox` binary.
//!
//! Runtime values are reference counted. Closures, bound methods and
//! instances form reference cycles only when a program stores a bound method
//! back onto an instance; such cycles are reclaimed when the interpreter is
//! dropped, and plain instance churn frees eagerly.

use std::fs;
use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use error::Reporter;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The driver: owns the interpreter and the error flags for a run, and
/// writes program output to the injected sink. Diagnostics go to stderr.
/// The expression-id counter lives here so ids stay unique across REPL
/// lines; the distance table keeps serving ASTs parsed on earlier lines.
pub struct Lox<'a> {
    interpreter: Interpreter<'a>,
    reporter: Reporter,
    next_id: expr::ExprId,
}

impl<'a> Lox<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        Lox {
            interpreter: Interpreter::new(output),
            reporter: Reporter::new(),
            next_id: 0,
        }
    }

    /// Runs a script file once. The caller decides the exit code from the
    /// error flags afterwards.
    pub fn run_file(&mut self, path: &str) -> io::Result<()> {
        let source = fs::read_to_string(path)?;
        self.run(&source);
        Ok(())
    }

    /// The interactive prompt. An empty line or end-of-file exits; the error
    /// flags reset after every line so one bad input does not poison the
    /// session. History persists to `~/.lox_history` across sessions.
    pub fn run_prompt(&mut self) -> rustyline::Result<()> {
        let mut editor = DefaultEditor::new()?;

        let history = home::home_dir().map(|dir| dir.join(".lox_history"));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    if line.is_empty() {
                        break;
                    }

                    let _ = editor.add_history_entry(&line);
                    self.run(&line);
                    self.reporter.reset();
                },
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(error) => return Err(error),
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }

        Ok(())
    }

    /// Runs one source unit through the pipeline. Each stage only runs when
    /// every earlier stage finished clean.
    pub fn run(&mut self, source: &str) {
        let tokens = Scanner::new(source, &mut self.reporter).scan_tokens();
        if self.reporter.had_error {
            return;
        }

        let statements = Parser::new(tokens, &mut self.next_id, &mut self.reporter).parse();
        if self.reporter.had_error {
            return;
        }

        Resolver::new(&mut self.interpreter, &mut self.reporter).resolve(&statements);
        if self.reporter.had_error {
            return;
        }

        self.interpreter.interpret(&statements, &mut self.reporter);
    }

    pub fn had_error(&self) -> bool {
        self.reporter.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.reporter.had_runtime_error
    }
}
