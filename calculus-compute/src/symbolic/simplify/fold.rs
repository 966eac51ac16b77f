//! Constant folding.

use calculus_parser::node::{Associativity, Leaf, Node, OpKind};

/// Computes the value of an internal node whose children are all numeric leaves.
///
/// Returns [`None`] if the node has a non-numeric child, or if the value would not be finite, as
/// in `1/0`. Operators with more than two children are applied following their associativity.
pub fn evaluate(node: &Node) -> Option<f64> {
    let internal = node.as_internal()?;
    let values = internal.children
        .iter()
        .map(|child| child.as_leaf().and_then(Leaf::value))
        .collect::<Option<Vec<_>>>()?;

    let op = internal.op;
    let value = match op.associativity() {
        Associativity::Left => values.into_iter()
            .reduce(|lhs, rhs| apply(op, lhs, rhs))?,
        Associativity::Right => values.into_iter()
            .rev()
            .reduce(|rhs, lhs| apply(op, lhs, rhs))?,
    };

    value.is_finite().then_some(value)
}

fn apply(op: OpKind, lhs: f64, rhs: f64) -> f64 {
    match op {
        OpKind::Add => lhs + rhs,
        OpKind::Sub => lhs - rhs,
        OpKind::Mul => lhs * rhs,
        OpKind::Div => lhs / rhs,
        OpKind::Exp => lhs.powf(rhs),
    }
}

/// Formats a folded value as the name of a numeric leaf. Whole numbers have no fractional part,
/// and negative zero is written as `0`.
pub fn leaf_name(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
