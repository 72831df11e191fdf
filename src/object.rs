use std::fmt::Display;

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Object {
    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// `nil` and `false` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean(false))
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Object {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) if n.is_infinite() => {
                write!(f, "{}", if n.is_sign_negative() { "-Infinity" } else { "Infinity" })
            }
            Self::Number(n) => {
                let text = n.to_string();
                // Integral values print without a fractional part
                write!(f, "{}", text.strip_suffix(".0").unwrap_or(&text))
            }
            Self::String(s) => write!(f, "{s}"),
            Self::Null => write!(f, "nil"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_have_no_fraction() {
        assert_eq!(Object::Number(3.0).to_string(), "3");
        assert_eq!(Object::Number(-12.0).to_string(), "-12");
        assert_eq!(Object::Number(2.5).to_string(), "2.5");
        assert_eq!(Object::Number(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn non_finite_numbers() {
        assert_eq!(Object::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Object::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Object::Number(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn display_other_values() {
        assert_eq!(Object::Null.to_string(), "nil");
        assert_eq!(Object::Boolean(true).to_string(), "true");
        assert_eq!(Object::from("hi there").to_string(), "hi there");
    }

    #[test]
    fn truthiness() {
        assert!(!Object::Null.is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(Object::Boolean(true).is_truthy());
        assert!(Object::Number(0.0).is_truthy());
        assert!(Object::from("").is_truthy());
    }

    #[test]
    fn equality_never_crosses_kinds() {
        assert_eq!(Object::Null, Object::Null);
        assert_ne!(Object::Null, Object::Boolean(false));
        assert_ne!(Object::Number(1.0), Object::from("1"));
        assert_ne!(Object::Number(f64::NAN), Object::Number(f64::NAN));
    }
}
