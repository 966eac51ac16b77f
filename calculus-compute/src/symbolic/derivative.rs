//! Differentiation of expression trees.
//!
//! The derivative is built one node at a time using the sum, product, quotient and power rules.
//! The result is not simplified; it usually contains terms such as `(x*0)` or `(2-1)` that
//! [`simplify`](super::simplify()) removes.

use calculus_error::Error;
use calculus_parser::node::{Internal, Node, OpKind};
use log::trace;
use super::error::UnsupportedOperator;

/// Returns the derivative of `node` with respect to the variable `var`.
///
/// Every leaf other than `var` is treated as a constant. Only constant exponents are supported:
/// differentiating `x^y` with respect to `y` returns an [`UnsupportedOperator`] error.
///
/// ```
/// use calculus_compute::symbolic::derivative;
/// use calculus_parser::{parse, render};
///
/// let node = parse("x*y").unwrap();
/// let d = derivative(&node, "x").unwrap();
/// assert_eq!(render(&d), "((1*y)+(x*0))");
/// ```
pub fn derivative(node: &Node, var: &str) -> Result<Node, Error> {
    let internal = match node {
        Node::Leaf(leaf) => {
            let d = if leaf.name == var { "1" } else { "0" };
            return Ok(Node::leaf(d));
        },
        Node::Internal(internal) => internal,
    };

    // an operator with one operand stands for the operand itself
    if let [only] = &*internal.children {
        return derivative(only, var);
    }

    match internal.op {
        OpKind::Add | OpKind::Sub => sum_rule(internal, var),
        OpKind::Mul => {
            trace!("product rule on {}", node);
            product_rule(&internal.children, var)
        },
        OpKind::Div => {
            trace!("quotient rule on {}", node);

            // `a/b/c` divides `a` by the product of the divisors
            let (u, divisors) = internal.children
                .split_first()
                .ok_or_else(|| unsupported(internal))?;
            let v = product(divisors);
            let numerator = Node::binary(
                OpKind::Sub,
                Node::binary(OpKind::Mul, derivative(u, var)?, v.clone()),
                Node::binary(OpKind::Mul, u.clone(), product_rule(divisors, var)?),
            );
            let denominator = Node::binary(OpKind::Exp, v, Node::leaf("2"));
            Ok(Node::binary(OpKind::Div, numerator, denominator))
        },
        OpKind::Exp => {
            trace!("power rule on {}", node);

            // `a^b^c` raises `a` to the power `b^c`
            let (base, exponents) = internal.children
                .split_first()
                .ok_or_else(|| unsupported(internal))?;
            let exponent = match exponents {
                [single] => single.clone(),
                _ => Node::internal(OpKind::Exp, exponents),
            };
            if exponent.mentions(var) {
                return Err(Error::spanless(UnsupportedOperator {
                    op: OpKind::Exp,
                    reason: format!("when the exponent depends on `{}`", var),
                }));
            }

            // n*d(base) * base^(n-1)
            let coefficient = Node::binary(OpKind::Mul, exponent.clone(), derivative(base, var)?);
            let power = Node::binary(
                OpKind::Exp,
                base.clone(),
                Node::binary(OpKind::Sub, exponent, Node::leaf("1")),
            );
            Ok(Node::binary(OpKind::Mul, coefficient, power))
        },
    }
}

/// Differentiates every term of a sum or difference, keeping the operator and the term order.
fn sum_rule(internal: &Internal, var: &str) -> Result<Node, Error> {
    let children = internal.children
        .iter()
        .map(|child| derivative(child, var))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::internal(internal.op, children))
}

/// Differentiates the product of `factors`: one term per factor, holding the product of every
/// factor with that one factor replaced by its derivative.
///
/// `d(u*v*w)` is `(d(u)*v*w) + (u*d(v)*w) + (u*v*d(w))`.
fn product_rule(factors: &[Node], var: &str) -> Result<Node, Error> {
    if let [only] = factors {
        return derivative(only, var);
    }

    let terms = (0..factors.len())
        .map(|i| -> Result<Node, Error> {
            let mut term = factors.to_vec();
            term[i] = derivative(&factors[i], var)?;
            Ok(Node::internal(OpKind::Mul, term))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::internal(OpKind::Add, terms))
}

/// Returns the product of `factors`, or the factor itself if there is only one.
fn product(factors: &[Node]) -> Node {
    match factors {
        [single] => single.clone(),
        _ => Node::internal(OpKind::Mul, factors),
    }
}

fn unsupported(internal: &Internal) -> Error {
    Error::spanless(UnsupportedOperator {
        op: internal.op,
        reason: format!("with {} operands", internal.children.len()),
    })
}

#[cfg(test)]
mod tests {
    use calculus_parser::{parse, render};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Differentiates the parsed expression and renders the result.
    fn d(source: &str, var: &str) -> String {
        render(&derivative(&parse(source).unwrap(), var).unwrap())
    }

    #[test]
    fn leaves() {
        assert_eq!(d("x", "x"), "1");
        assert_eq!(d("y", "x"), "0");
        assert_eq!(d("42", "x"), "0");
        assert_eq!(d("xy", "x"), "0");
    }

    #[test]
    fn sum_keeps_shape() {
        assert_eq!(d("x + y + 3", "x"), "(1+0+0)");
        assert_eq!(d("x - y", "y"), "(0-1)");
    }

    #[test]
    fn product_rule() {
        assert_eq!(d("x*y", "x"), "((1*y)+(x*0))");
    }

    #[test]
    fn product_of_three() {
        assert_eq!(d("a*b*x", "x"), "((0*b*x)+(a*0*x)+(a*b*1))");
    }

    #[test]
    fn quotient_of_three() {
        assert_eq!(d("x/a/b", "x"), "(((1*(a*b))-(x*((0*b)+(a*0))))/((a*b)^2))");
    }

    #[test]
    fn wide_product() {
        let source = vec!["x"; 600].join(" * ");
        let d = derivative(&parse(&source).unwrap(), "x").unwrap();

        let terms = &d.as_internal().unwrap().children;
        assert_eq!(terms.len(), 600);
        for (i, term) in terms.iter().enumerate() {
            let factors = &term.as_internal().unwrap().children;
            assert_eq!(factors.len(), 600);
            assert_eq!(factors[i], Node::leaf("1"));
            assert_eq!(factors[(i + 1) % 600], Node::leaf("x"));
        }
    }

    #[test]
    fn wide_sum() {
        let source = vec!["x"; 3_000].join(" + ");
        let d = derivative(&parse(&source).unwrap(), "x").unwrap();
        assert_eq!(d.as_internal().unwrap().children.len(), 3_000);
    }

    #[test]
    fn hand_built_power_chain() {
        let node = Node::internal(OpKind::Exp, vec![Node::leaf("x"), Node::leaf("2"), Node::leaf("3")]);
        assert_eq!(render(&derivative(&node, "x").unwrap()), "(((2^3)*1)*(x^((2^3)-1)))");
    }

    #[test]
    fn quotient_rule() {
        assert_eq!(d("1/x", "x"), "(((0*x)-(1*1))/(x^2))");
    }

    #[test]
    fn power_rule() {
        assert_eq!(d("x^2", "x"), "((2*1)*(x^(2-1)))");
        assert_eq!(d("x^n", "x"), "((n*1)*(x^(n-1)))");
    }

    #[test]
    fn chain_through_power_base() {
        assert_eq!(d("(2*x)^3", "x"), "((3*((0*x)+(2*1)))*((2*x)^(3-1)))");
    }

    #[test]
    fn variable_exponent_is_unsupported() {
        let err = derivative(&parse("2^x").unwrap(), "x").unwrap_err();
        let kind = err.downcast_ref::<UnsupportedOperator>().unwrap();
        assert_eq!(kind.op, OpKind::Exp);
        assert_eq!(err.offset(), None);

        // the exponent only has to be constant with respect to the chosen variable
        assert_eq!(d("2^x", "y"), "((x*0)*(2^(x-1)))");
    }

    #[test]
    fn single_operand_nodes() {
        let node = Node::internal(OpKind::Mul, vec![Node::leaf("x")]);
        assert_eq!(derivative(&node, "x").unwrap(), Node::leaf("1"));
    }

    #[test]
    fn input_is_left_untouched() {
        let node = parse("x^2 + x*y^3 + 2").unwrap();
        let before = node.clone();
        derivative(&node, "x").unwrap();
        assert_eq!(node, before);
    }
}
