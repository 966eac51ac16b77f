use ariadne::Fmt;
use calculus_attrs::ErrorKind;
use calculus_error::EXPR;

/// The input contained nothing to parse.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    labels = [format!("I expected to see an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyExpression;

/// An operator is missing one of its operands, such as in `x + * y` or `x -`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operand",
    labels = [format!("this operator needs an {} on both sides", "operand".fg(EXPR))],
)]
pub struct EmptyOperand;

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if self.opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// A character that is not part of any token.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected character `{}`", self.found),
    labels = ["I don't know what this is"],
    help = format!(
        "expressions may only contain numbers, names, parentheses, and the operators {}",
        "+ - * / ^".fg(EXPR),
    ),
)]
pub struct UnexpectedCharacter {
    /// The text that could not be tokenized.
    pub found: String,
}

/// Two operands were written next to each other, such as in `2 x` or `(a)(b)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operator",
    labels = ["this operand follows another one directly"],
    help = format!("multiplication must be written explicitly, as in {}", "2*x".fg(EXPR)),
)]
pub struct MissingOperator;

/// The expression is nested deeper than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = [format!("nesting exceeds {} levels here", self.max_depth)],
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth of the parser.
    pub max_depth: usize,
}
