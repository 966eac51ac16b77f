//! Rewrite relations between expression patterns.
//!
//! A [`Relation`] states that a tree matching its left-hand side can be replaced by its right-hand
//! side, with the wildcards of the left-hand side substituted into the right-hand side. Relations
//! are written as ordinary expressions and parsed with [`calculus_parser::parse`]:
//!
//! ```
//! use calculus_compute::symbolic::relation::build_relation;
//! use calculus_parser::{parse, render};
//!
//! let relation = build_relation("a * 1", "a").unwrap();
//! let rewritten = relation.apply(&parse("(x+y) * 1").unwrap()).unwrap();
//! assert_eq!(render(&rewritten), "(x+y)");
//! ```
//!
//! The default set used to clean up derivatives lives in [`rules`].

pub mod pattern;
pub mod rules;

use calculus_error::Error;
use calculus_parser::{node::Node, parse};
use std::fmt::{self, Display, Formatter};
use super::error::OddRelationCount;

pub use pattern::{match_pattern, rebuild, Bindings};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rewrite rule between two patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Relation {
    /// The pattern a tree must match to be rewritten.
    pub lhs: Node,

    /// The pattern the tree is rewritten into.
    pub rhs: Node,

    /// Whether the relation may also be applied from right to left.
    pub bidirectional: bool,
}

impl Relation {
    /// Creates a relation that rewrites `lhs` into `rhs`.
    pub fn new(lhs: Node, rhs: Node) -> Self {
        Self { lhs, rhs, bidirectional: false }
    }

    /// Creates a relation that can rewrite in both directions.
    pub fn bidirectional(lhs: Node, rhs: Node) -> Self {
        Self { lhs, rhs, bidirectional: true }
    }

    /// Applies the relation to the root of `concrete`, returning the rewritten tree.
    ///
    /// The left-hand side is tried first. If it does not match and the relation is bidirectional,
    /// the right-hand side is tried next. Returns [`None`] if neither side matches.
    pub fn apply(&self, concrete: &Node) -> Option<Node> {
        rewrite(&self.lhs, &self.rhs, concrete).or_else(|| {
            if self.bidirectional {
                rewrite(&self.rhs, &self.lhs, concrete)
            } else {
                None
            }
        })
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let arrow = if self.bidirectional { "<=>" } else { "=>" };
        write!(f, "{} {} {}", self.lhs, arrow, self.rhs)
    }
}

fn rewrite(from: &Node, to: &Node, concrete: &Node) -> Option<Node> {
    let bindings = match_pattern(from, concrete)?;
    Some(rebuild(to, &bindings))
}

/// Parses both sides of a one-directional relation.
pub fn build_relation(lhs: &str, rhs: &str) -> Result<Relation, Error> {
    Ok(Relation::new(parse(lhs)?, parse(rhs)?))
}

/// Parses both sides of a bidirectional relation.
pub fn build_relation_bidirectional(lhs: &str, rhs: &str) -> Result<Relation, Error> {
    Ok(Relation::bidirectional(parse(lhs)?, parse(rhs)?))
}

/// Builds one-directional relations from a flat list of sides, read as `lhs, rhs` pairs.
///
/// Returns an [`OddRelationCount`] error if a side is left without a partner, or the first parse
/// error among the sides.
pub fn build_relations<S: AsRef<str>>(sides: &[S]) -> Result<Vec<Relation>, Error> {
    if sides.len() % 2 != 0 {
        return Err(Error::spanless(OddRelationCount { len: sides.len() }));
    }

    sides.chunks_exact(2)
        .map(|pair| build_relation(pair[0].as_ref(), pair[1].as_ref()))
        .collect()
}
