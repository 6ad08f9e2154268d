//! Binding power of binary operators, loosest first.

use exprcheck_ast::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BinaryPrecedence {
    /// Below every operator; the starting point of a binary parse.
    Floor,
    Coalesce,
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponent,
}

impl BinaryPrecedence {
    /// The precedence of `kind` as a binary operator, if it is one.
    pub fn of(kind: SyntaxKind) -> Option<Self> {
        use SyntaxKind as K;
        let precedence = match kind {
            K::QuestionQuestionToken => Self::Coalesce,
            K::BarBarToken => Self::Or,
            K::AmpersandAmpersandToken => Self::And,
            K::BarToken => Self::BitOr,
            K::CaretToken => Self::BitXor,
            K::AmpersandToken => Self::BitAnd,
            K::EqualsEqualsToken
            | K::ExclamationEqualsToken
            | K::EqualsEqualsEqualsToken
            | K::ExclamationEqualsEqualsToken => Self::Equality,
            K::LessThanToken
            | K::GreaterThanToken
            | K::LessThanEqualsToken
            | K::GreaterThanEqualsToken
            | K::InstanceOfKeyword
            | K::InKeyword => Self::Relational,
            K::LessThanLessThanToken
            | K::GreaterThanGreaterThanToken
            | K::GreaterThanGreaterThanGreaterThanToken => Self::Shift,
            K::PlusToken | K::MinusToken => Self::Additive,
            K::AsteriskToken | K::SlashToken | K::PercentToken => Self::Multiplicative,
            K::AsteriskAsteriskToken => Self::Exponent,
            _ => return None,
        };
        Some(precedence)
    }

    /// The floor for parsing the right operand. `**` groups to the right,
    /// so its operand may contain another `**`.
    pub fn right_operand_floor(self) -> Self {
        match self {
            Self::Exponent => Self::Multiplicative,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicative_binds_tighter_than_additive() {
        assert!(BinaryPrecedence::of(SyntaxKind::AsteriskToken) > BinaryPrecedence::of(SyntaxKind::PlusToken));
        assert_eq!(
            BinaryPrecedence::of(SyntaxKind::InstanceOfKeyword),
            Some(BinaryPrecedence::Relational)
        );
    }

    #[test]
    fn test_non_operators_have_no_precedence() {
        assert_eq!(BinaryPrecedence::of(SyntaxKind::CommaToken), None);
        assert_eq!(BinaryPrecedence::of(SyntaxKind::EqualsToken), None);
        assert_eq!(BinaryPrecedence::of(SyntaxKind::QuestionToken), None);
    }

    #[test]
    fn test_only_exponent_lowers_its_right_floor() {
        assert_eq!(
            BinaryPrecedence::Exponent.right_operand_floor(),
            BinaryPrecedence::Multiplicative
        );
        assert_eq!(BinaryPrecedence::Additive.right_operand_floor(), BinaryPrecedence::Additive);
    }
}
