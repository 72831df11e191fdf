#![allow(clippy::new_without_default)]

mod ast;
mod error;
mod interpreter;
mod object;
mod parser;
mod printer;
mod scanner;
mod token;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::error::*;
    pub use crate::interpreter::*;
    pub use crate::object::*;
    pub use crate::parser::*;
    pub use crate::printer::AstPrinter;
    pub use crate::scanner::*;
    pub use crate::token::*;
}

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use log::debug;

use prelude::{AstPrinter, ErrorReporter, Interpreter, Parser, Scanner, Stmt};

/// Wrong command line usage.
pub const EX_USAGE: i32 = 64;
/// The script has a lexical or syntax error.
pub const EX_DATAERR: i32 = 65;
/// The script failed while running.
pub const EX_SOFTWARE: i32 = 70;
/// The script could not be read.
pub const EX_IOERR: i32 = 74;

pub struct Lox {
    interpreter: Interpreter,
    print_ast: bool,
}

impl Lox {
    pub fn new() -> Self {
        Self { interpreter: Interpreter::new(), print_ast: false }
    }

    /// Print the syntax tree of each program instead of running it.
    pub fn with_ast_printing(self, print_ast: bool) -> Self {
        Self { print_ast, ..self }
    }

    pub fn with_output(self, out: Box<dyn Write>) -> Self {
        Self { interpreter: self.interpreter.with_output(out), ..self }
    }
}

impl Lox {
    /// Run a script and return the process exit code.
    pub fn run_file(&mut self, filename: &Path) -> Result<i32, anyhow::Error> {
        let content = match std::fs::read_to_string(filename) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Failed to read '{}': {e}", filename.display());
                return Ok(EX_IOERR);
            }
        };

        let reporter = self.run(&content)?;
        Ok(reporter.exit_code().unwrap_or(0))
    }

    /// Read lines from stdin and run each one until end of input.
    ///
    /// Variables persist from line to line, errors do not.
    pub fn run_prompt(&mut self) -> Result<(), anyhow::Error> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("> ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                println!();
                return Ok(());
            };
            let line = line.context("failed to read from stdin")?;
            self.run_line(&line)?;
        }
    }

    /// Run one line typed at the prompt. A line that is a single expression
    /// statement prints its value.
    pub fn run_line(&mut self, line: &str) -> Result<ErrorReporter, anyhow::Error> {
        let mut reporter = ErrorReporter::new();
        let Some(statements) = self.front_end(line, &mut reporter) else {
            return Ok(reporter);
        };

        match statements.as_slice() {
            [Stmt::Expression { expr }] if !self.print_ast => {
                self.interpreter.echo(expr, &mut reporter)?;
            }
            _ => self.execute(&statements, &mut reporter)?,
        }

        Ok(reporter)
    }

    /// Scan, parse and run `source` as a whole program.
    pub fn run(&mut self, source: &str) -> Result<ErrorReporter, anyhow::Error> {
        let mut reporter = ErrorReporter::new();
        if let Some(statements) = self.front_end(source, &mut reporter) {
            self.execute(&statements, &mut reporter)?;
        }

        Ok(reporter)
    }

    /// Scan and parse. Returns `None` when any error was reported, since the
    /// tree may then be missing parts.
    fn front_end(&mut self, source: &str, reporter: &mut ErrorReporter) -> Option<Vec<Stmt>> {
        let (tokens, scanner_errors) = Scanner::new(source).scan_tokens();
        scanner_errors.iter().for_each(|e| reporter.scanner_error(e));

        let (statements, parser_errors) = Parser::new(tokens).parse();
        parser_errors.iter().for_each(|e| reporter.parser_error(e));

        if reporter.had_error() {
            debug!("not running: {} errors", reporter.diagnostics().len());
            return None;
        }

        Some(statements)
    }

    fn execute(&mut self, statements: &[Stmt], reporter: &mut ErrorReporter) -> io::Result<()> {
        if self.print_ast {
            let mut stdout = io::stdout().lock();
            for stmt in statements {
                writeln!(stdout, "{}", AstPrinter::stmt_to_string(stmt))?;
            }
            return Ok(());
        }

        self.interpreter.interpret(statements, reporter)
    }
}
