//! Operator precedence for binary operators.

use reline_syntax::SyntaxKind;

/// Binary precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Range = 0,
    Additive = 1,
    Multiplicative = 2,
    Unary = 3,
    Invalid = 255,
}

impl OperatorPrecedence {
    /// The level that binds operands at this level.
    pub fn next(self) -> OperatorPrecedence {
        match self {
            OperatorPrecedence::Range => OperatorPrecedence::Additive,
            OperatorPrecedence::Additive => OperatorPrecedence::Multiplicative,
            _ => OperatorPrecedence::Unary,
        }
    }

    /// Whether operators at this level chain. Only ranges do: `1+2+3` stops
    /// after `1+2`.
    pub fn is_repeating(self) -> bool {
        self == OperatorPrecedence::Range
    }
}

/// Get the binary operator precedence for a given token kind.
pub fn binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::DotDot => OperatorPrecedence::Range,
        SyntaxKind::Plus | SyntaxKind::Minus => OperatorPrecedence::Additive,
        SyntaxKind::Asterisk | SyntaxKind::Slash | SyntaxKind::Percent | SyntaxKind::LessThan => {
            OperatorPrecedence::Multiplicative
        }
        _ => OperatorPrecedence::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(OperatorPrecedence::Range < OperatorPrecedence::Additive);
        assert!(OperatorPrecedence::Additive < OperatorPrecedence::Multiplicative);
        assert_eq!(OperatorPrecedence::Range.next(), OperatorPrecedence::Additive);
        assert_eq!(OperatorPrecedence::Multiplicative.next(), OperatorPrecedence::Unary);
    }

    #[test]
    fn test_concatenation_binds_like_multiplication() {
        assert_eq!(
            binary_operator_precedence(SyntaxKind::LessThan),
            OperatorPrecedence::Multiplicative
        );
        assert_eq!(binary_operator_precedence(SyntaxKind::Colon), OperatorPrecedence::Invalid);
    }
}
