use crate::token::Token;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("{msg}")]
    InvalidOperand { operator: Token, msg: String },
    #[error("Undefined variable '{}'.", .name.lexeme)]
    UndefinedVariable { name: Token },
    /// Writing `print` output failed. This is not a fault of the script.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl RuntimeError {
    pub fn invalid_operand(operator: &Token, msg: &str) -> Self {
        Self::InvalidOperand { operator: operator.clone(), msg: msg.to_owned() }
    }

    /// Source line the error points at, if it comes from the script.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidOperand { operator, .. } => Some(operator.line),
            Self::UndefinedVariable { name } => Some(name.line),
            Self::Output(_) => None,
        }
    }
}
