use super::InterpreterResult;
use crate::prelude::*;

impl Interpreter {
    pub fn evaluate_expr(&mut self, expr: &Expr) -> InterpreterResult {
        match expr {
            Expr::Literal { value } => Ok(value.clone()),
            Expr::Grouping { expr: inner } => self.evaluate_expr(inner),
            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),
            Expr::Binary { left, operator, right } => self.evaluate_binary(left, operator, right),
            Expr::Variable { name } => self.environment.get(name),
            Expr::Assignment { name, value } => {
                let value = self.evaluate_expr(value)?;
                self.environment.assign(name, value.clone())?;
                Ok(value)
            }
            Expr::Logical { left, operator, right } => {
                let left_val = self.evaluate_expr(left)?;

                if operator.token_type == TokenType::Or {
                    if left_val.is_truthy() {
                        return Ok(left_val);
                    }
                } else {
                    // TokenType::And
                    if !left_val.is_truthy() {
                        return Ok(left_val);
                    }
                }

                self.evaluate_expr(right)
            }
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> InterpreterResult {
        let value = self.evaluate_expr(right)?;
        match operator.token_type {
            TokenType::Minus => value
                .number()
                .map(|n| Object::Number(-n))
                .ok_or_else(|| RuntimeError::invalid_operand(operator, "Operand must be a number.")),
            TokenType::Bang => Ok(Object::Boolean(!value.is_truthy())),

            // The parser builds no other unary expression
            _ => Err(RuntimeError::invalid_operand(operator, "Unknown unary operator.")),
        }
    }

    fn evaluate_binary(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> InterpreterResult {
        let left_value = self.evaluate_expr(left)?;
        let right_value = self.evaluate_expr(right)?;

        match operator.token_type {
            TokenType::Plus => {
                if let (Some(l), Some(r)) = (left_value.number(), right_value.number()) {
                    Ok(Object::Number(l + r))
                } else if let (Some(l), Some(r)) = (left_value.string(), right_value.string()) {
                    Ok(Object::String(format!("{l}{r}")))
                } else {
                    Err(RuntimeError::invalid_operand(
                        operator,
                        "Operands must be two numbers or two strings.",
                    ))
                }
            }
            TokenType::Minus => check_number_operands(operator, &left_value, &right_value)
                .map(|(l, r)| Object::Number(l - r)),
            TokenType::Star => check_number_operands(operator, &left_value, &right_value)
                .map(|(l, r)| Object::Number(l * r)),
            TokenType::Slash => check_number_operands(operator, &left_value, &right_value)
                .map(|(l, r)| Object::Number(l / r)),
            TokenType::Greater => check_number_operands(operator, &left_value, &right_value)
                .map(|(l, r)| Object::Boolean(l > r)),
            TokenType::GreaterEqual => check_number_operands(operator, &left_value, &right_value)
                .map(|(l, r)| Object::Boolean(l >= r)),
            TokenType::Less => check_number_operands(operator, &left_value, &right_value)
                .map(|(l, r)| Object::Boolean(l < r)),
            TokenType::LessEqual => check_number_operands(operator, &left_value, &right_value)
                .map(|(l, r)| Object::Boolean(l <= r)),

            TokenType::EqualEqual => Ok(Object::Boolean(left_value == right_value)),
            TokenType::BangEqual => Ok(Object::Boolean(left_value != right_value)),

            // The parser builds no other binary expression
            _ => Err(RuntimeError::invalid_operand(operator, "Unknown binary operator.")),
        }
    }
}

fn check_number_operands(
    operator: &Token,
    left: &Object,
    right: &Object,
) -> Result<(f64, f64), RuntimeError> {
    if let (Some(l), Some(r)) = (left.number(), right.number()) {
        Ok((l, r))
    } else {
        Err(RuntimeError::invalid_operand(operator, "Operands must be numbers."))
    }
}
