use std::io::Write;

use log::trace;

use crate::prelude::*;

impl Interpreter {
    pub fn execute(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Expression { expr } => {
                self.evaluate_expr(expr)?;
            }
            Stmt::Print { expr } => {
                let value = self.evaluate_expr(expr)?;
                writeln!(self.out, "{value}")?;
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate_expr(expr)?,
                    None => Object::Null,
                };

                trace!("define '{}' = {value}", name.lexeme);
                self.environment.define(&name.lexeme, value);
            }
            Stmt::Block { statements } => self.execute_block(statements)?,
            Stmt::If { condition, then_branch, else_branch } => {
                if self.evaluate_expr(condition)?.is_truthy() {
                    self.execute(then_branch)?;
                } else if let Some(stmt) = else_branch {
                    self.execute(stmt)?;
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate_expr(condition)?.is_truthy() {
                    self.execute(body)?;
                }
            }
        };
        Ok(())
    }

    /// Run `statements` in a fresh scope nested in the current one. The scope
    /// is dropped afterwards, also when a statement failed.
    pub fn execute_block(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        let enclosing = std::mem::take(&mut self.environment);
        self.environment = Environment::new().with_enclosing(enclosing);
        trace!("enter scope at depth {}", self.environment.depth());

        let result = statements.iter().try_for_each(|s| self.execute(s));

        let scope = std::mem::take(&mut self.environment);
        if let Some(enclosing) = scope.into_enclosing() {
            self.environment = enclosing;
        }
        trace!("leave scope, back at depth {}", self.environment.depth());

        result
    }
}
