use std::fmt::{Display, Formatter, Result};
use super::node::{Internal, Leaf, Node};

impl Display for Leaf {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.name)
    }
}

/// Every internal node is wrapped in exactly one pair of parentheses, so the output never depends
/// on operator precedence and can always be parsed back into the same tree.
impl Display for Internal {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "(")?;
        let mut iter = self.children.iter();
        if let Some(child) = iter.next() {
            write!(f, "{}", child)?;
            for child in iter {
                write!(f, "{}{}", self.op, child)?;
            }
        }
        write!(f, ")")
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Leaf(leaf) => leaf.fmt(f),
            Self::Internal(internal) => internal.fmt(f),
        }
    }
}

/// Renders the tree as a fully parenthesized string.
pub fn render(node: &Node) -> String {
    node.to_string()
}
