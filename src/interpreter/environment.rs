use std::collections::HashMap;

use super::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// One lexical scope.
///
/// A scope owns its enclosing scope while it is active. When a block
/// finishes, the interpreter takes the enclosing scope back out with
/// [`Environment::into_enclosing`] and the block's own bindings are dropped.
#[derive(Debug, Default)]
pub struct Environment {
    enclosing: Option<Box<Environment>>,
    values: HashMap<String, Object>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(self, enclosing: Environment) -> Self {
        Self { enclosing: Some(Box::new(enclosing)), ..self }
    }

    pub fn into_enclosing(self) -> Option<Environment> {
        self.enclosing.map(|e| *e)
    }

    /// Number of scopes between this one and the global scope.
    pub fn depth(&self) -> usize {
        self.enclosing.as_ref().map_or(0, |e| e.depth() + 1)
    }

    /// Bind `name` in this scope, shadowing or replacing any earlier binding.
    pub fn define(&mut self, name: &str, value: Object) {
        self.values.insert(name.to_owned(), value);
    }

    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            return Ok(());
        }

        // Ask one level above if possible
        match self.enclosing {
            Some(ref mut e) => e.assign(name, value),
            None => Err(RuntimeError::UndefinedVariable { name: name.clone() }),
        }
    }

    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        match self.enclosing {
            Some(ref e) => e.get(name),
            None => Err(RuntimeError::UndefinedVariable { name: name.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    fn ident(name: &str) -> Token {
        Token::new(TokenType::Identifier, name, None, 4)
    }

    #[test]
    fn get_walks_enclosing_scopes() {
        let mut globals = Environment::new();
        globals.define("a", Object::Number(1.0));
        let inner = Environment::new().with_enclosing(globals);

        assert_eq!(inner.get(&ident("a")).unwrap(), Object::Number(1.0));
        assert_eq!(inner.depth(), 1);
    }

    #[test]
    fn define_shadows_only_the_current_scope() {
        let mut globals = Environment::new();
        globals.define("a", Object::Number(1.0));
        let mut inner = Environment::new().with_enclosing(globals);
        inner.define("a", Object::Number(2.0));

        assert_eq!(inner.get(&ident("a")).unwrap(), Object::Number(2.0));
        let globals = inner.into_enclosing().unwrap();
        assert_eq!(globals.get(&ident("a")).unwrap(), Object::Number(1.0));
    }

    #[test]
    fn assign_updates_the_nearest_binding() {
        let mut globals = Environment::new();
        globals.define("a", Object::Number(1.0));
        let mut inner = Environment::new().with_enclosing(globals);

        inner.assign(&ident("a"), Object::from("changed")).unwrap();

        let globals = inner.into_enclosing().unwrap();
        assert_eq!(globals.get(&ident("a")).unwrap(), Object::from("changed"));
    }

    #[test]
    fn undefined_variable() {
        let mut env = Environment::new().with_enclosing(Environment::new());

        let err = env.get(&ident("nope")).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'nope'.");
        assert_eq!(err.line(), Some(4));

        assert!(env.assign(&ident("nope"), Object::Null).is_err());
        assert!(env.get(&ident("nope")).is_err());
    }
}
