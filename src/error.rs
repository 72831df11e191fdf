use std::fmt::Display;

use crate::prelude::*;

/// Which pipeline stage reported a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Parse,
    Runtime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub line: usize,
    pub location: String,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.location.is_empty() {
            write!(f, "[line {}] Error: {}", self.line, self.message)
        } else {
            write!(f, "[line {}] Error {}: {}", self.line, self.location, self.message)
        }
    }
}

/// Collects the diagnostics of a single run.
///
/// Every reported diagnostic is written to stderr unless the reporter is
/// quiet, and is kept so the caller can inspect what went wrong. A fresh
/// reporter is created for each run, which is how the REPL forgets errors
/// from a previous line.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    quiet: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that records diagnostics without printing them.
    pub fn quiet() -> Self {
        Self { quiet: true, ..Default::default() }
    }

    pub fn report(&mut self, kind: ErrorKind, line: usize, location: &str, message: &str) {
        let diagnostic = Diagnostic {
            kind,
            line,
            location: location.to_owned(),
            message: message.to_owned(),
        };

        if !self.quiet {
            eprintln!("{diagnostic}");
        }

        self.diagnostics.push(diagnostic);
    }

    pub fn scanner_error(&mut self, e: &ScannerError) {
        self.report(ErrorKind::Lexical, e.line, "", &e.message);
    }

    pub fn parser_error(&mut self, e: &ParserError) {
        self.report(ErrorKind::Parse, e.token.line, &e.token.location(), &e.message);
    }

    pub fn runtime_error(&mut self, e: &RuntimeError) {
        self.report(ErrorKind::Runtime, e.line().unwrap_or_default(), "", &e.to_string());
    }

    /// Whether a lexical or parse error was reported.
    pub fn had_error(&self) -> bool {
        self.diagnostics.iter().any(|d| d.kind != ErrorKind::Runtime)
    }

    pub fn had_runtime_error(&self) -> bool {
        self.diagnostics.iter().any(|d| d.kind == ErrorKind::Runtime)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Process exit status for a script run, `None` when the run was clean.
    pub fn exit_code(&self) -> Option<i32> {
        if self.had_error() {
            Some(crate::EX_DATAERR)
        } else if self.had_runtime_error() {
            Some(crate::EX_SOFTWARE)
        } else {
            None
        }
    }
}
