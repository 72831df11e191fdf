use crate::prelude::*;

/// Renders syntax trees as parenthesized prefix notation.
pub struct AstPrinter;

impl AstPrinter {
    pub fn to_string(expr: &Expr) -> String {
        match expr {
            Expr::Binary { left, operator, right } | Expr::Logical { left, operator, right } => {
                format!(
                    "({} {} {})",
                    operator.lexeme,
                    Self::to_string(left),
                    Self::to_string(right)
                )
            }
            Expr::Grouping { expr } => format!("(group {})", Self::to_string(expr)),
            Expr::Literal { value: Object::String(s) } => format!("{s:?}"),
            Expr::Literal { value } => format!("{value}"),
            Expr::Unary { operator, right } => {
                format!("({} {})", operator.lexeme, Self::to_string(right))
            }
            Expr::Variable { name } => name.lexeme.clone(),
            Expr::Assignment { name, value } => {
                format!("(= {} {})", name.lexeme, Self::to_string(value))
            }
        }
    }

    pub fn stmt_to_string(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Print { expr } => format!("(print {})", Self::to_string(expr)),
            Stmt::Expression { expr } => format!("(; {})", Self::to_string(expr)),
            Stmt::Var { name, initializer: Some(init) } => {
                format!("(var {} {})", name.lexeme, Self::to_string(init))
            }
            Stmt::Var { name, initializer: None } => format!("(var {})", name.lexeme),
            Stmt::Block { statements } => {
                let mut s = String::from("(block");
                for stmt in statements {
                    s.push(' ');
                    s.push_str(&Self::stmt_to_string(stmt));
                }
                s.push(')');
                s
            }
            Stmt::If { condition, then_branch, else_branch } => match else_branch {
                Some(else_branch) => format!(
                    "(if {} {} {})",
                    Self::to_string(condition),
                    Self::stmt_to_string(then_branch),
                    Self::stmt_to_string(else_branch)
                ),
                None => format!(
                    "(if {} {})",
                    Self::to_string(condition),
                    Self::stmt_to_string(then_branch)
                ),
            },
            Stmt::While { condition, body } => {
                format!("(while {} {})", Self::to_string(condition), Self::stmt_to_string(body))
            }
        }
    }
}
