use std::io::{self, Write};

use log::debug;

use crate::prelude::*;

pub struct Interpreter {
    pub(super) environment: Environment,
    pub(super) out: Box<dyn Write>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self { environment: Environment::new(), out: Box::new(io::stdout()) }
    }

    /// Send `print` output somewhere other than stdout.
    pub fn with_output(self, out: Box<dyn Write>) -> Self {
        Self { out, ..self }
    }

    /// Run a program. The first runtime error is reported and stops the
    /// remaining statements; whatever already happened stays done.
    ///
    /// Only a failure to write output is returned as an error.
    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut ErrorReporter) -> io::Result<()> {
        debug!("interpreting {} statements", statements.len());

        for stmt in statements {
            match self.execute(stmt) {
                Ok(()) => {}
                Err(RuntimeError::Output(e)) => return Err(e),
                Err(e) => {
                    reporter.runtime_error(&e);
                    break;
                }
            }
        }

        self.out.flush()
    }

    /// Evaluate a single expression and print its value, as the prompt does
    /// for a line holding a bare expression.
    pub fn echo(&mut self, expr: &Expr, reporter: &mut ErrorReporter) -> io::Result<()> {
        match self.evaluate_expr(expr) {
            Ok(value) => writeln!(self.out, "{value}")?,
            Err(RuntimeError::Output(e)) => return Err(e),
            Err(e) => reporter.runtime_error(&e),
        }

        self.out.flush()
    }
}
