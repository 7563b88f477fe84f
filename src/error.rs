use thiserror::Error;

use crate::object::Object;
use crate::token::{Token, Type};

/// Collects diagnostics for a single run and remembers whether any stage
/// failed. The driver hands a `&mut Reporter` to the scanner, parser and
/// resolver in turn, then consults the flags to decide whether the next
/// stage may run. The REPL resets it between lines.
#[derive(Debug, Default)]
pub struct Reporter {
    pub had_error: bool,
    pub had_runtime_error: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports a lexical error, which has no token to anchor to.
    pub fn error(&mut self, line: usize, message: &str) {
        self.report(line, "", message);
    }

    /// Reports a static error anchored at a token.
    pub fn error_at(&mut self, token: &Token, message: &str) {
        if token.r#type == Type::EOF {
            self.report(token.line, " at end", message);
        } else {
            self.report(token.line, &format!(" at '{}'", token.lexeme), message);
        }
    }

    fn report(&mut self, line: usize, location: &str, message: &str) {
        eprintln!("[line {line}] Error{location}: {message}");
        self.had_error = true;
    }

    /// Reports an evaluation error escaping to the driver.
    pub fn runtime_error(&mut self, error: &RuntimeError) {
        eprintln!("{error}");
        self.had_runtime_error = true;
    }

    /// Clears both flags so the next REPL line starts fresh.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

/// Signal thrown by the parser to unwind to the nearest statement boundary.
/// The offending token and message are already reported by the time this is
/// in flight; `declaration` catches it and synchronizes.
#[derive(Debug)]
pub struct ParseError;

/// An error produced while evaluating the program. Carries the token whose
/// line number anchors the report.
#[derive(Debug, Clone, Error)]
#[error("{message}\n[line {}]", .token.line)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

/// Unwinds statement execution. `Return` travels to the nearest function
/// boundary carrying the returned value; `Error` propagates all the way to
/// the driver. Keeping them in one type lets `?` thread both through the
/// evaluator, while the function-call boundary catches only `Return`.
#[derive(Debug)]
pub enum Interrupt {
    Error(RuntimeError),
    Return(Object),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Interrupt::Error(error)
    }
}
