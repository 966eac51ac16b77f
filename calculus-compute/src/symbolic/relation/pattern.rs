//! Structural pattern matching of expression trees.
//!
//! A pattern is an ordinary [`Node`]. Its symbolic leaves are wildcards that match any subtree,
//! while its numeric leaves and operators must appear exactly as written. For example, the pattern
//! `a + 0` matches `(x*y) + 0`, binding `a` to `x*y`, but does not match `x + 1`.

use calculus_parser::node::Node;
use std::collections::HashMap;

/// The subtrees bound to the wildcards of a pattern during a successful match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings(HashMap<String, Node>);

impl Bindings {
    /// Returns the subtree bound to the wildcard `name`.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.0.get(name)
    }

    /// Binds `name` to `concrete`. If `name` is already bound, the binding only succeeds when the
    /// existing subtree is equal to `concrete`.
    fn bind(&mut self, name: &str, concrete: &Node) -> bool {
        match self.0.get(name) {
            Some(bound) => bound == concrete,
            None => {
                self.0.insert(name.to_string(), concrete.clone());
                true
            },
        }
    }
}

/// Matches `concrete` against `pattern`, returning the wildcard bindings on success.
///
/// A wildcard that appears more than once must match equal subtrees every time, so `a - a`
/// matches `x - x` but not `x - y`.
pub fn match_pattern(pattern: &Node, concrete: &Node) -> Option<Bindings> {
    let mut bindings = Bindings::default();
    match_into(pattern, concrete, &mut bindings).then_some(bindings)
}

fn match_into(pattern: &Node, concrete: &Node, bindings: &mut Bindings) -> bool {
    match (pattern, concrete) {
        (Node::Leaf(wildcard), _) if wildcard.is_symbolic() => bindings.bind(&wildcard.name, concrete),
        (Node::Leaf(expected), Node::Leaf(found)) => expected.name == found.name,
        (Node::Internal(expected), Node::Internal(found)) => {
            expected.op == found.op
                && expected.children.len() == found.children.len()
                && expected.children
                    .iter()
                    .zip(found.children.iter())
                    .all(|(p, c)| match_into(p, c, bindings))
        },
        _ => false,
    }
}

/// Builds a new tree from `pattern`, replacing every bound wildcard with its subtree. Leaves that
/// are not bound are copied as they are.
pub fn rebuild(pattern: &Node, bindings: &Bindings) -> Node {
    match pattern {
        Node::Leaf(leaf) => bindings.get(&leaf.name)
            .cloned()
            .unwrap_or_else(|| pattern.clone()),
        Node::Internal(internal) => {
            let children = internal.children
                .iter()
                .map(|child| rebuild(child, bindings))
                .collect::<Vec<_>>();
            Node::internal(internal.op, children)
        },
    }
}

#[cfg(test)]
mod tests {
    use calculus_parser::{parse, render};
    use pretty_assertions::assert_eq;
    use super::*;

    fn node(source: &str) -> Node {
        parse(source).unwrap()
    }

    #[test]
    fn wildcard_binds_subtree() {
        let bindings = match_pattern(&node("a + 0"), &node("(x*y) + 0")).unwrap();
        assert_eq!(bindings.get("a"), Some(&node("x*y")));
        assert_eq!(bindings.get("x"), None);
    }

    #[test]
    fn numeric_leaf_must_match_exactly() {
        assert!(match_pattern(&node("a + 0"), &node("x + 0")).is_some());
        assert!(match_pattern(&node("a + 0"), &node("x + 1")).is_none());
    }

    #[test]
    fn operator_must_match() {
        assert!(match_pattern(&node("a * b"), &node("x + y")).is_none());
    }

    #[test]
    fn arity_must_match() {
        assert!(match_pattern(&node("a + b"), &node("x + y + z")).is_none());
    }

    #[test]
    fn internal_pattern_rejects_leaf() {
        assert!(match_pattern(&node("a * 1"), &node("x")).is_none());
    }

    #[test]
    fn repeated_wildcard_needs_equal_subtrees() {
        assert!(match_pattern(&node("a - a"), &node("(x^2) - (x^2)")).is_some());
        assert!(match_pattern(&node("a - a"), &node("x - y")).is_none());
    }

    #[test]
    fn bare_wildcard_matches_anything() {
        let bindings = match_pattern(&node("a"), &node("2 * x")).unwrap();
        assert_eq!(bindings.get("a"), Some(&node("2 * x")));
    }

    #[test]
    fn rebuild_substitutes_bound_leaves() {
        let bindings = match_pattern(&node("a + a"), &node("(x*y) + (x*y)")).unwrap();
        let rebuilt = rebuild(&node("2 * a"), &bindings);
        assert_eq!(render(&rebuilt), "(2*(x*y))");
    }

    #[test]
    fn rebuild_keeps_unbound_leaves() {
        let bindings = match_pattern(&node("a"), &node("x")).unwrap();
        assert_eq!(render(&rebuild(&node("a + b"), &bindings)), "(x+b)");
    }
}
