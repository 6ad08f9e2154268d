//! SyntaxKind enum - token and node kinds for expressions and declarations.

/// The kind of a syntax token or node in the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    QuestionQuestionToken,
    EqualsToken,

    // Identifiers
    Identifier,

    // Reserved words
    ConstKeyword,
    FalseKeyword,
    FunctionKeyword,
    InKeyword,
    InstanceOfKeyword,
    NullKeyword,
    TrueKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,

    // Contextual keywords
    AnyKeyword,
    BooleanKeyword,
    DeclareKeyword,
    InterfaceKeyword,
    LetKeyword,
    NeverKeyword,
    NumberKeyword,
    ObjectKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UnknownKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================

    // Types
    TypeReference,
    FunctionType,
    TypeLiteral,
    ArrayType,
    UnionType,
    ParenthesizedType,
    LiteralType,
    PropertySignature,
    MethodSignature,
    Parameter,

    // Expressions
    ParenthesizedExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    PrefixUnaryExpression,
    TypeOfExpression,
    VoidExpression,
    BinaryExpression,
    ConditionalExpression,
    MissingExpression,

    // Statements and declarations
    Block,
    EmptyStatement,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    ExpressionStatement,
    FunctionDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    SourceFile,
}

impl SyntaxKind {
    pub fn is_keyword(self) -> bool {
        self >= SyntaxKind::ConstKeyword && self <= SyntaxKind::UnknownKeyword
    }

    /// Keywords that may still be used as identifier names.
    pub fn is_contextual_keyword(self) -> bool {
        self >= SyntaxKind::AnyKeyword && self <= SyntaxKind::UnknownKeyword
    }

    /// Whether this token can start or continue an identifier reference.
    pub fn is_identifier_or_contextual_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_contextual_keyword()
    }

    /// Get the keyword text for a keyword kind, or None if not a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::ConstKeyword => Some("const"),
            SyntaxKind::FalseKeyword => Some("false"),
            SyntaxKind::FunctionKeyword => Some("function"),
            SyntaxKind::InKeyword => Some("in"),
            SyntaxKind::InstanceOfKeyword => Some("instanceof"),
            SyntaxKind::NullKeyword => Some("null"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::TypeOfKeyword => Some("typeof"),
            SyntaxKind::VarKeyword => Some("var"),
            SyntaxKind::VoidKeyword => Some("void"),
            SyntaxKind::AnyKeyword => Some("any"),
            SyntaxKind::BooleanKeyword => Some("boolean"),
            SyntaxKind::DeclareKeyword => Some("declare"),
            SyntaxKind::InterfaceKeyword => Some("interface"),
            SyntaxKind::LetKeyword => Some("let"),
            SyntaxKind::NeverKeyword => Some("never"),
            SyntaxKind::NumberKeyword => Some("number"),
            SyntaxKind::ObjectKeyword => Some("object"),
            SyntaxKind::StringKeyword => Some("string"),
            SyntaxKind::SymbolKeyword => Some("symbol"),
            SyntaxKind::TypeKeyword => Some("type"),
            SyntaxKind::UndefinedKeyword => Some("undefined"),
            SyntaxKind::UnknownKeyword => Some("unknown"),
            _ => None,
        }
    }

    /// Look up a keyword SyntaxKind from text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "const" => Some(SyntaxKind::ConstKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "function" => Some(SyntaxKind::FunctionKeyword),
            "in" => Some(SyntaxKind::InKeyword),
            "instanceof" => Some(SyntaxKind::InstanceOfKeyword),
            "null" => Some(SyntaxKind::NullKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "typeof" => Some(SyntaxKind::TypeOfKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            "void" => Some(SyntaxKind::VoidKeyword),
            "any" => Some(SyntaxKind::AnyKeyword),
            "boolean" => Some(SyntaxKind::BooleanKeyword),
            "declare" => Some(SyntaxKind::DeclareKeyword),
            "interface" => Some(SyntaxKind::InterfaceKeyword),
            "let" => Some(SyntaxKind::LetKeyword),
            "never" => Some(SyntaxKind::NeverKeyword),
            "number" => Some(SyntaxKind::NumberKeyword),
            "object" => Some(SyntaxKind::ObjectKeyword),
            "string" => Some(SyntaxKind::StringKeyword),
            "symbol" => Some(SyntaxKind::SymbolKeyword),
            "type" => Some(SyntaxKind::TypeKeyword),
            "undefined" => Some(SyntaxKind::UndefinedKeyword),
            "unknown" => Some(SyntaxKind::UnknownKeyword),
            _ => None,
        }
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::OpenBraceToken => Some("{"),
            SyntaxKind::CloseBraceToken => Some("}"),
            SyntaxKind::OpenParenToken => Some("("),
            SyntaxKind::CloseParenToken => Some(")"),
            SyntaxKind::OpenBracketToken => Some("["),
            SyntaxKind::CloseBracketToken => Some("]"),
            SyntaxKind::DotToken => Some("."),
            SyntaxKind::DotDotDotToken => Some("..."),
            SyntaxKind::SemicolonToken => Some(";"),
            SyntaxKind::CommaToken => Some(","),
            SyntaxKind::LessThanToken => Some("<"),
            SyntaxKind::GreaterThanToken => Some(">"),
            SyntaxKind::LessThanEqualsToken => Some("<="),
            SyntaxKind::GreaterThanEqualsToken => Some(">="),
            SyntaxKind::EqualsEqualsToken => Some("=="),
            SyntaxKind::ExclamationEqualsToken => Some("!="),
            SyntaxKind::EqualsEqualsEqualsToken => Some("==="),
            SyntaxKind::ExclamationEqualsEqualsToken => Some("!=="),
            SyntaxKind::EqualsGreaterThanToken => Some("=>"),
            SyntaxKind::PlusToken => Some("+"),
            SyntaxKind::MinusToken => Some("-"),
            SyntaxKind::AsteriskToken => Some("*"),
            SyntaxKind::AsteriskAsteriskToken => Some("**"),
            SyntaxKind::SlashToken => Some("/"),
            SyntaxKind::PercentToken => Some("%"),
            SyntaxKind::LessThanLessThanToken => Some("<<"),
            SyntaxKind::GreaterThanGreaterThanToken => Some(">>"),
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => Some(">>>"),
            SyntaxKind::AmpersandToken => Some("&"),
            SyntaxKind::BarToken => Some("|"),
            SyntaxKind::CaretToken => Some("^"),
            SyntaxKind::ExclamationToken => Some("!"),
            SyntaxKind::TildeToken => Some("~"),
            SyntaxKind::AmpersandAmpersandToken => Some("&&"),
            SyntaxKind::BarBarToken => Some("||"),
            SyntaxKind::QuestionToken => Some("?"),
            SyntaxKind::ColonToken => Some(":"),
            SyntaxKind::QuestionQuestionToken => Some("??"),
            SyntaxKind::EqualsToken => Some("="),
            _ => None,
        }
    }

    /// Source text of a token kind: punctuation, then keywords.
    pub fn token_text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for text in ["instanceof", "in", "typeof", "declare", "unknown"] {
            let kind = SyntaxKind::from_keyword(text).unwrap();
            assert!(kind.is_keyword());
            assert_eq!(kind.keyword_text(), Some(text));
        }
        assert_eq!(SyntaxKind::from_keyword("foo"), None);
    }

    #[test]
    fn test_contextual_keywords() {
        assert!(SyntaxKind::NumberKeyword.is_contextual_keyword());
        assert!(SyntaxKind::LetKeyword.is_identifier_or_contextual_keyword());
        assert!(!SyntaxKind::InstanceOfKeyword.is_contextual_keyword());
        assert!(!SyntaxKind::NullKeyword.is_identifier_or_contextual_keyword());
    }
}
