//! Simplification of expression trees.
//!
//! Simplification runs in passes. Each pass walks the tree bottom-up: the children of a node are
//! simplified first, then the node itself is either folded into a number (when all of its operands
//! are numbers) or rewritten by the first relation that applies to it. At most one change is made
//! to each node per pass, so [`simplify`] repeats passes until the tree stops changing.
//!
//! ```
//! use calculus_compute::symbolic::{relation::rules::default_relations, simplify};
//! use calculus_parser::{parse, render};
//!
//! let node = parse("(x*1) + (0*y) + 2*3").unwrap();
//! let simplified = simplify(&node, default_relations()).unwrap();
//! assert_eq!(render(&simplified), "(x+6)");
//! ```

pub mod fold;
pub mod step;

use calculus_error::Error;
use calculus_parser::node::{Associativity, Node, OpKind};
use log::{debug, trace};
use step::Step;
use super::{error::NoFixedPoint, relation::Relation, step_collector::StepCollector};

/// The number of passes [`simplify`] runs before giving up on reaching a fixed point.
pub const DEFAULT_MAX_PASSES: usize = 64;

/// Runs one bottom-up pass over the tree.
fn simplify_pass(
    node: &Node,
    relations: &[Relation],
    step_collector: &mut dyn StepCollector<Step>,
) -> Node {
    let Node::Internal(internal) = node else {
        return node.clone();
    };

    let children = internal.children
        .iter()
        .map(|child| simplify_pass(child, relations, step_collector))
        .collect::<Vec<_>>();
    reduce_operands(internal.op, children, relations, step_collector)
}

/// Combines the simplified operands of an operator pair by pair, in the order given by the
/// operator's associativity, so that binary relations can reach every operand.
///
/// For `a+b+c`, the pairs `a+b` and then `(a+b)+c` are each folded or rewritten at most once. The
/// operands that could not be combined are kept side by side in one node, so an n-ary node that
/// nothing applies to keeps its shape.
fn reduce_operands(
    op: OpKind,
    children: Vec<Node>,
    relations: &[Relation],
    step_collector: &mut dyn StepCollector<Step>,
) -> Node {
    let associativity = op.associativity();
    let mut operands = children.into_iter();
    if associativity == Associativity::Right {
        operands = operands.rev().collect::<Vec<_>>().into_iter();
    }

    // operands of the group built so far, in the order they are visited
    let mut group = operands.next().into_iter().collect::<Vec<_>>();
    for operand in operands {
        let grouped = group_node(op, associativity, &group);
        let pair = match associativity {
            Associativity::Left => Node::binary(op, grouped, operand.clone()),
            Associativity::Right => Node::binary(op, operand.clone(), grouped),
        };

        match reduce(&pair, relations, step_collector) {
            // a result with the same operator joins the group as its operands, keeping it flat
            Some(Node::Internal(result)) if result.op == op => {
                group = result.children.to_vec();
                if associativity == Associativity::Right {
                    group.reverse();
                }
            },
            Some(result) => group = vec![result],
            None => group.push(operand),
        }
    }

    group_node(op, associativity, &group)
}

/// Builds the node for a group of operands collected by [`reduce_operands`].
fn group_node(op: OpKind, associativity: Associativity, group: &[Node]) -> Node {
    match (group, associativity) {
        ([single], _) => single.clone(),
        (_, Associativity::Left) => Node::internal(op, group),
        (_, Associativity::Right) => Node::internal(op, group.iter().rev().cloned().collect::<Vec<_>>()),
    }
}

/// Folds `node` into a number, or rewrites it with the first relation that applies to it.
fn reduce(
    node: &Node,
    relations: &[Relation],
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Node> {
    if let Some(value) = fold::evaluate(node) {
        let folded = Node::leaf(fold::leaf_name(value));
        debug!("folded {} into {}", node, folded);
        step_collector.push(Step::Fold { expr: node.to_string(), value });
        return Some(folded);
    }

    relations.iter()
        .enumerate()
        .find_map(|(index, relation)| relation.apply(node).map(|rewritten| (index, relation, rewritten)))
        .map(|(index, relation, rewritten)| {
            debug!("relation {} ({}) rewrote {} into {}", index, relation, node, rewritten);
            step_collector.push(Step::Rewrite {
                relation: index,
                before: node.to_string(),
                after: rewritten.to_string(),
            });
            rewritten
        })
}

/// Base implementation of the simplification loop.
fn inner_simplify_with(
    node: &Node,
    relations: &[Relation],
    max_passes: usize,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Node, Error> {
    let mut node = node.clone();

    for pass in 1..=max_passes {
        let next = simplify_pass(&node, relations, step_collector);
        if next == node {
            trace!("reached a fixed point after {} passes: {}", pass, next);
            return Ok(next);
        }
        node = next;
    }

    Err(Error::spanless(NoFixedPoint { passes: max_passes }))
}

/// Runs a single simplification pass over the tree. Nodes rewritten during the pass are not
/// revisited until the next pass.
pub fn simplify_once(node: &Node, relations: &[Relation]) -> Node {
    simplify_pass(node, relations, &mut ())
}

/// Simplifies the tree with the given relations until it stops changing.
///
/// Returns a [`NoFixedPoint`] error if the tree is still changing after [`DEFAULT_MAX_PASSES`]
/// passes.
pub fn simplify(node: &Node, relations: &[Relation]) -> Result<Node, Error> {
    inner_simplify_with(node, relations, DEFAULT_MAX_PASSES, &mut ())
}

/// Simplifies the tree with the given relations, running at most `max_passes` passes.
pub fn simplify_with(node: &Node, relations: &[Relation], max_passes: usize) -> Result<Node, Error> {
    inner_simplify_with(node, relations, max_passes, &mut ())
}

/// Simplifies the tree with the given relations. The steps taken by the simplifier are also
/// collected and returned, in the order they were taken.
pub fn simplify_with_steps(
    node: &Node,
    relations: &[Relation],
) -> Result<(Node, Vec<Step>), Error> {
    let mut steps = Vec::new();
    let node = inner_simplify_with(node, relations, DEFAULT_MAX_PASSES, &mut steps)?;
    Ok((node, steps))
}

#[cfg(test)]
mod tests {
    use calculus_parser::{parse, render, OpKind};
    use pretty_assertions::assert_eq;
    use super::*;
    use super::super::{
        derivative,
        relation::{build_relation_bidirectional, build_relations, rules::default_relations},
    };

    /// Parses, simplifies with the default relations and renders.
    fn simplified(source: &str) -> String {
        render(&simplify(&parse(source).unwrap(), default_relations()).unwrap())
    }

    /// Differentiates, simplifies with the default relations and renders.
    fn simplified_derivative(source: &str, var: &str) -> String {
        let d = derivative(&parse(source).unwrap(), var).unwrap();
        render(&simplify(&d, default_relations()).unwrap())
    }

    #[test]
    fn fold_without_relations() {
        let node = simplify(&parse("2+3*4").unwrap(), &[]).unwrap();
        assert_eq!(node, Node::leaf("14"));
    }

    #[test]
    fn division_by_zero_is_not_folded() {
        assert_eq!(simplified("1/0"), "(1/0)");
        assert_eq!(simplified("x + 1/0"), "(x+(1/0))");
    }

    #[test]
    fn leaves_are_unchanged() {
        assert_eq!(simplify_once(&Node::leaf("x"), default_relations()), Node::leaf("x"));
        assert_eq!(simplify_once(&Node::leaf("3"), default_relations()), Node::leaf("3"));
    }

    #[test]
    fn one_change_per_node_per_pass() {
        let relations = build_relations(&["a - 0", "a + 0", "a + 0", "a"]).unwrap();
        let node = parse("x - 0").unwrap();

        // the rewritten node is only revisited on the next pass
        let once = simplify_once(&node, &relations);
        assert_eq!(render(&once), "(x+0)");
        assert_eq!(render(&simplify_once(&once, &relations)), "x");
        assert_eq!(render(&simplify(&node, &relations).unwrap()), "x");
    }

    #[test]
    fn children_before_parents() {
        let relations = build_relations(&["a*1", "a", "a+0", "a"]).unwrap();
        assert_eq!(render(&simplify_once(&parse("(x*1)+0").unwrap(), &relations)), "x");
    }

    #[test]
    fn nary_nodes_reduce_pairwise() {
        assert_eq!(simplified("x*1*1"), "x");
        assert_eq!(simplified("0 + x + 0"), "x");
        assert_eq!(simplified("2 + x + 3"), "(2+x+3)");
        assert_eq!(simplified("2 * 3 * x * 1"), "(6*x)");
        assert_eq!(simplified("x + 0 + y + 0 + z"), "(x+y+z)");
        assert_eq!(simplified("2 ^ 3 ^ 1"), "8");
    }

    #[test]
    fn untouched_nary_node_keeps_its_shape() {
        for source in ["a + b + c", "a - b - c", "a * b / c"] {
            let node = parse(source).unwrap();
            assert_eq!(simplify(&node, &[]).unwrap(), node);
            assert_eq!(simplify(&node, default_relations()).unwrap(), node);
        }
    }

    #[test]
    fn wide_sum() {
        let node = parse(&vec!["x"; 3_000].join(" + ")).unwrap();
        let simplified = simplify(&node, default_relations()).unwrap();

        // `x+x` becomes `2*x`, and no relation applies to the remaining terms
        let terms = &simplified.as_internal().unwrap().children;
        assert_eq!(terms.len(), 2_999);
        assert_eq!(terms[0], parse("2*x").unwrap());
        assert_eq!(terms[2_998], Node::leaf("x"));
    }

    #[test]
    fn wide_product() {
        let node = parse(&vec!["1"; 3_000].join(" * ")).unwrap();
        assert_eq!(simplify(&node, &[]).unwrap(), Node::leaf("1"));

        let node = parse(&vec!["y"; 3_000].join(" * ")).unwrap();
        let simplified = simplify(&node, &[]).unwrap();
        assert_eq!(simplified, node);
    }

    #[test]
    fn repeated_operands() {
        assert_eq!(simplified("(x*y) - (x*y)"), "0");
        assert_eq!(simplified("x*x"), "(x^2)");
        assert_eq!(simplified("y + y"), "(2*y)");
    }

    #[test]
    fn derivative_of_product() {
        assert_eq!(simplified_derivative("x*y", "x"), "y");
    }

    #[test]
    fn derivative_of_square() {
        assert_eq!(simplified_derivative("x^2", "x"), "(2*x)");
    }

    #[test]
    fn derivative_of_polynomial() {
        assert_eq!(simplified_derivative("2 + x*y^3 + x^2", "y"), "(x*(3*(y^2)))");
        assert_eq!(simplified_derivative("x^2 + x*y^3 + 2", "x"), "((2*x)+(y^3))");
    }

    #[test]
    fn derivative_of_quotient() {
        assert_eq!(simplified_derivative("1/x", "x"), "(-1/(x^2))");
    }

    #[test]
    fn idempotent() {
        for source in ["x*y + 0", "x^2 + x*y^3 + 2", "(a+b)*(a+b)", "3*4 - z"] {
            let once = simplify(&parse(source).unwrap(), default_relations()).unwrap();
            let twice = simplify(&once, default_relations()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn input_is_left_untouched() {
        let node = parse("(x*1) + 0").unwrap();
        let before = node.clone();
        simplify(&node, default_relations()).unwrap();
        assert_eq!(node, before);
    }

    #[test]
    fn cycling_relations_never_settle() {
        let relations = vec![build_relation_bidirectional("a + b", "b + a").unwrap()];
        let err = simplify(&parse("x + y").unwrap(), &relations).unwrap_err();
        assert_eq!(err.downcast_ref::<NoFixedPoint>(), Some(&NoFixedPoint { passes: DEFAULT_MAX_PASSES }));

        let err = simplify_with(&parse("x + y").unwrap(), &relations, 3).unwrap_err();
        assert_eq!(err.downcast_ref::<NoFixedPoint>(), Some(&NoFixedPoint { passes: 3 }));
    }

    #[test]
    fn pass_limit_counts_the_settling_pass() {
        // one pass changes the tree and a second one confirms nothing else changes
        let node = parse("x*1").unwrap();
        assert!(simplify_with(&node, default_relations(), 1).is_err());
        assert_eq!(simplify_with(&node, default_relations(), 2).unwrap(), Node::leaf("x"));
    }

    #[test]
    fn steps_are_collected_in_order() {
        let relations = build_relations(&["a/1", "a", "a*1", "a"]).unwrap();
        let (node, steps) = simplify_with_steps(&parse("(2+3) + (x*1)").unwrap(), &relations).unwrap();
        assert_eq!(node, Node::binary(OpKind::Add, Node::leaf("5"), Node::leaf("x")));
        assert_eq!(steps, vec![
            Step::Fold { expr: "(2+3)".to_string(), value: 5.0 },
            Step::Rewrite { relation: 1, before: "(x*1)".to_string(), after: "x".to_string() },
        ]);
    }

    #[test]
    fn fold_before_relations() {
        // `1*1` is folded rather than rewritten by `1*a`
        let (node, steps) = simplify_with_steps(
            &Node::binary(OpKind::Mul, Node::leaf("1"), Node::leaf("1")),
            default_relations(),
        ).unwrap();
        assert_eq!(node, Node::leaf("1"));
        assert!(matches!(steps.as_slice(), [Step::Fold { .. }]));
    }
}
