//! The expression tree produced by the parser and consumed by every other part of the engine.
//!
//! A [`Node`] is either a [`Leaf`] holding a name (a number such as `2` or a symbol such as `x`), or
//! an [`Internal`] node holding an operator and an ordered, non-empty list of children. Operators of
//! the same kind that appear next to each other are kept at the same level, so `a+b+c` is a single
//! `+` node with three children.
//!
//! Nodes are immutable. The children of an internal node live behind an [`Arc`], so cloning a node
//! is cheap and the same subtree can appear in several trees at once. Every transformation builds
//! new nodes instead of editing existing ones.
//!
//! ```
//! use calculus_parser::{node::{Node, OpKind}, parse};
//!
//! let node = parse("x + 2").unwrap();
//! assert_eq!(node, Node::binary(OpKind::Add, Node::leaf("x"), Node::leaf("2")));
//! ```

pub mod op;

use std::sync::Arc;

pub use op::{Associativity, OpKind, Precedence};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node without children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leaf {
    /// The text of the leaf, such as `x`, `42` or `-0.5`.
    pub name: String,
}

impl Leaf {
    /// Creates a leaf with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns true if the leaf is a numeric literal. Negative literals, which constant folding can
    /// produce, count as numeric.
    pub fn is_numeric(&self) -> bool {
        self.name
            .strip_prefix('-')
            .unwrap_or(&self.name)
            .starts_with(|c: char| c.is_ascii_digit())
    }

    /// Returns true if the leaf is a symbol (a variable, or a wildcard inside a pattern).
    pub fn is_symbolic(&self) -> bool {
        self.name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
    }

    /// Returns the value of a numeric leaf.
    pub fn value(&self) -> Option<f64> {
        if self.is_numeric() {
            self.name.parse().ok()
        } else {
            None
        }
    }
}

/// A node holding an operator and the operands it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Internal {
    /// The operator.
    pub op: OpKind,

    /// The operands, in order. Never empty.
    pub children: Arc<[Node]>,
}

/// An expression tree.
///
/// [`PartialEq`] is structural: two nodes are equal if they have the same shape, the same operators
/// and the same leaf names, in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// A number or a symbol.
    Leaf(Leaf),

    /// An operator applied to one or more operands.
    Internal(Internal),
}

impl Node {
    /// Creates a leaf node.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::Leaf(Leaf::new(name))
    }

    /// Creates an internal node. `children` must not be empty.
    pub fn internal(op: OpKind, children: impl Into<Arc<[Node]>>) -> Self {
        let children = children.into();
        debug_assert!(!children.is_empty(), "internal node without children");
        Self::Internal(Internal { op, children })
    }

    /// Creates an internal node with two children.
    pub fn binary(op: OpKind, lhs: Node, rhs: Node) -> Self {
        Self::internal(op, vec![lhs, rhs])
    }

    /// If the node is a leaf, returns a reference to it.
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Internal(_) => None,
        }
    }

    /// If the node is an internal node, returns a reference to it.
    pub fn as_internal(&self) -> Option<&Internal> {
        match self {
            Self::Internal(internal) => Some(internal),
            Self::Leaf(_) => None,
        }
    }

    /// Returns true if a symbolic leaf named `name` appears anywhere in the tree.
    pub fn mentions(&self, name: &str) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.name == name,
            Self::Internal(internal) => internal.children.iter().any(|child| child.mentions(name)),
        }
    }
}
