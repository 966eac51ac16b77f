//! Errors produced while transforming trees. None of these point at source code, so they are
//! created with [`Error::spanless`](calculus_error::Error::spanless).

use ariadne::Fmt;
use calculus_attrs::ErrorKind;
use calculus_error::EXPR;
use calculus_parser::node::OpKind;

/// No differentiation rule exists for this use of the operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate the `{}` operator {}", self.op, self.reason),
)]
pub struct UnsupportedOperator {
    /// The operator that could not be differentiated.
    pub op: OpKind,

    /// Why the operator could not be differentiated.
    pub reason: String,
}

/// A flat list of relation sides had an odd number of entries.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("relation list has an odd number of sides ({})", self.len),
    help = format!("relations are written as {} pairs", "left, right".fg(EXPR)),
)]
pub struct OddRelationCount {
    /// The length of the list.
    pub len: usize,
}

/// Simplification kept changing the tree and never settled.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("simplification did not reach a fixed point after {} passes", self.passes),
    help = "a set of relations that undo each other, such as a bidirectional commutativity rule, will never settle",
)]
pub struct NoFixedPoint {
    /// The number of passes that were run.
    pub passes: usize,
}
