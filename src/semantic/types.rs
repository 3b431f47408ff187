use std::fmt;

use crate::frontend::token::TokenKind;

/// A declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Integer,
    Real,
    Boolean,
}

impl DataType {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Integer => Some(DataType::Integer),
            TokenKind::Real => Some(DataType::Real),
            TokenKind::Boolean => Some(DataType::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => f.write_str("integer"),
            DataType::Real => f.write_str("real"),
            DataType::Boolean => f.write_str("boolean"),
        }
    }
}

/// What an expression leaf actually is: a variable of some declared type, or
/// a literal. Literals are kept apart from declared types because they widen
/// differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Typed(DataType),
    IntConst,
    RealConst,
    BoolConst,
}

impl Operand {
    pub fn from_literal(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::IntConst => Some(Operand::IntConst),
            TokenKind::RealConst => Some(Operand::RealConst),
            TokenKind::True | TokenKind::False => Some(Operand::BoolConst),
            _ => None,
        }
    }

    /// The type name used in diagnostics.
    pub fn type_name(self) -> DataType {
        match self {
            Operand::Typed(data_type) => data_type,
            Operand::IntConst => DataType::Integer,
            Operand::RealConst => DataType::Real,
            Operand::BoolConst => DataType::Boolean,
        }
    }
}

/// Compatibility table. `integer` values and literals widen to `real`; nothing
/// narrows, and booleans only match booleans.
pub fn accepts(expected: DataType, actual: Operand) -> bool {
    match (expected, actual) {
        (expected, Operand::Typed(actual)) if expected == actual => true,
        (DataType::Boolean, Operand::BoolConst) => true,
        (DataType::Integer, Operand::IntConst) => true,
        (DataType::Real, Operand::RealConst | Operand::IntConst | Operand::Typed(DataType::Integer)) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_accepts_every_numeric_operand() {
        for actual in [
            Operand::RealConst,
            Operand::IntConst,
            Operand::Typed(DataType::Integer),
            Operand::Typed(DataType::Real),
        ] {
            assert!(accepts(DataType::Real, actual), "{:?}", actual);
        }
        assert!(!accepts(DataType::Real, Operand::BoolConst));
        assert!(!accepts(DataType::Real, Operand::Typed(DataType::Boolean)));
    }

    #[test]
    fn integer_never_narrows() {
        assert!(accepts(DataType::Integer, Operand::IntConst));
        assert!(!accepts(DataType::Integer, Operand::RealConst));
        assert!(!accepts(DataType::Integer, Operand::Typed(DataType::Real)));
        assert!(!accepts(DataType::Integer, Operand::BoolConst));
    }

    #[test]
    fn boolean_accepts_only_booleans() {
        assert!(accepts(DataType::Boolean, Operand::BoolConst));
        assert!(accepts(DataType::Boolean, Operand::Typed(DataType::Boolean)));
        assert!(!accepts(DataType::Boolean, Operand::IntConst));
        assert!(!accepts(DataType::Boolean, Operand::Typed(DataType::Integer)));
    }

    #[test]
    fn literal_kinds() {
        assert_eq!(Operand::from_literal(TokenKind::True), Some(Operand::BoolConst));
        assert_eq!(Operand::from_literal(TokenKind::IntConst), Some(Operand::IntConst));
        assert_eq!(Operand::from_literal(TokenKind::Ident), None);
        assert_eq!(Operand::RealConst.type_name().to_string(), "real");
    }
}
