//! exprcheck_diagnostics: Diagnostic messages and the reporting data model.
//!
//! Every diagnostic the scanner, parser, host and checker can produce is
//! declared in [`messages`] as a template with a code and category. A
//! realized [`Diagnostic`] always carries the half-open character span it
//! refers to.

use exprcheck_core::text::{TextPos, TextSpan};
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file this diagnostic belongs to, when it came from a named source.
    pub file: Option<String>,
    /// The source span this diagnostic highlights.
    pub span: TextSpan,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    pub fn new(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Start offset (inclusive).
    #[inline]
    pub fn start(&self) -> TextPos {
        self.span.start
    }

    /// End offset (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.span.end()
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}({}): ", file, self.span.start)?;
        }
        write!(
            f,
            "{} EC{}: {} {}",
            self.category, self.code, self.message_text, self.span
        )
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// An ordered collection of diagnostics accumulated during one pass.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner and parser errors (1000-1199)
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1003, Error, "Identifier expected.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1128, Error, "Declaration or statement expected.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "Expression expected.");
    pub const TYPE_EXPECTED: DiagnosticMessage = diag!(1110, Error, "Type expected.");
    pub const UNEXPECTED_TOKEN_AFTER_EXPRESSION: DiagnosticMessage = diag!(1012, Error, "Unexpected token '{0}' after expression.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, Error, "Unterminated template literal.");
    pub const A_REST_PARAMETER_MUST_BE_LAST: DiagnosticMessage = diag!(1014, Error, "A rest parameter must be last in a parameter list.");

    // ========================================================================
    // Host declaration errors (2300-2399)
    // ========================================================================
    pub const CANNOT_FIND_NAME_0: DiagnosticMessage = diag!(2304, Error, "Cannot find name '{0}'.");
    pub const DUPLICATE_IDENTIFIER_0: DiagnosticMessage = diag!(2300, Error, "Duplicate identifier '{0}'.");
    pub const TYPE_ALIAS_0_CIRCULARLY_REFERENCES_ITSELF: DiagnosticMessage = diag!(2456, Error, "Type alias '{0}' circularly references itself.");
    pub const CANNOT_ASSIGN_TO_0_BECAUSE_IT_IS_A_CONSTANT: DiagnosticMessage = diag!(2588, Error, "Cannot assign to '{0}' because it is a constant.");

    // ========================================================================
    // Expression checker errors
    // ========================================================================
    pub const _0_IS_NOT_DEFINED: DiagnosticMessage = diag!(2304, Error, "'{0}' is not defined");
    pub const THE_LEFT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_NUMBER_OR_ANY: DiagnosticMessage = diag!(2362, Error, "The left-hand side of an arithmetic operation must be of type 'number' or 'any'");
    pub const THE_RIGHT_HAND_SIDE_OF_AN_ARITHMETIC_OPERATION_MUST_BE_OF_TYPE_NUMBER_OR_ANY: DiagnosticMessage = diag!(2363, Error, "The right-hand side of an arithmetic operation must be of type 'number' or 'any'");
    pub const THE_BINARY_OPERATOR_0_CANNOT_BE_APPLIED_TO_TYPE_1_AND_2: DiagnosticMessage = diag!(2365, Error, "The binary operator '{0}' cannot be applied to type '{1}' and '{2}'");
    pub const THE_LEFT_HAND_SIDE_OF_AN_INSTANCEOF_EXPRESSION_MUST_BE_OF_TYPE_OBJECT_OR_ANY: DiagnosticMessage = diag!(2358, Error, "The left-hand side of an 'instanceof' expression must be of type 'object' or 'any'");
    pub const THE_RIGHT_HAND_SIDE_OF_AN_INSTANCEOF_EXPRESSION_MUST_BE_OF_TYPE_FUNCTION_OR_ANY: DiagnosticMessage = diag!(2359, Error, "The right-hand side of an 'instanceof' expression must be of type 'Function' or 'any'");
    pub const THE_LEFT_HAND_SIDE_OF_AN_IN_EXPRESSION_MUST_BE_OF_TYPE_STRING_NUMBER_SYMBOL_OR_ANY: DiagnosticMessage = diag!(2360, Error, "The left-hand side of an 'in' expression must be of type 'string', 'number', 'symbol' or 'any'");
    pub const THE_RIGHT_HAND_SIDE_OF_AN_IN_EXPRESSION_MUST_BE_OF_TYPE_OBJECT_OR_ANY: DiagnosticMessage = diag!(2361, Error, "The right-hand side of an 'in' expression must be of type 'object' or 'any'");
    pub const PROPERTY_0_DOES_NOT_EXIST_ON_TYPE_1: DiagnosticMessage = diag!(2339, Error, "Property '{0}' does not exist on type '{1}'");
    pub const THIS_EXPRESSION_IS_NOT_CALLABLE_TYPE_0_HAS_NO_CALL_SIGNATURES: DiagnosticMessage = diag!(2349, Error, "This expression is not callable. Type '{0}' has no call signatures");
    pub const EXPECTED_0_ARGUMENTS_BUT_GOT_1: DiagnosticMessage = diag!(2554, Error, "Expected {0} arguments, but got {1}");
    pub const EXPECTED_AT_LEAST_0_ARGUMENTS_BUT_GOT_1: DiagnosticMessage = diag!(2555, Error, "Expected at least {0} arguments, but got {1}");
    pub const EXPRESSION_IS_TOO_DEEPLY_NESTED_TO_CHECK: DiagnosticMessage = diag!(2589, Error, "Expression is too deeply nested to check.");
}
