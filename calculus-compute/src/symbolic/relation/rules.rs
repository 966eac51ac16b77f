//! The default relations used to tidy up derivatives.

use once_cell::sync::Lazy;
use super::{build_relations, Relation};

/// The default relations as `lhs, rhs` pairs, in the order they are tried.
const DEFAULT_SIDES: &[&str] = &[
    // identities
    "x + 0", "x",
    "0 + a", "a",
    "a - 0", "a",
    "x * 1", "x",
    "1 * a", "a",
    "a / 1", "a",
    "x ^ 1", "x",

    // absorbing elements
    "a * 0", "0",
    "0 * a", "0",
    "0 / a", "0",
    "a ^ 0", "1",
    "1 ^ a", "1",

    // repeated operands
    "a - a", "0",
    "a + a", "2 * a",
    "a * a", "a ^ 2",
];

static DEFAULT_RELATIONS: Lazy<Vec<Relation>> = Lazy::new(|| {
    build_relations(DEFAULT_SIDES).unwrap_or_else(|err| panic!("invalid default relation: {}", err))
});

/// Returns the default relations, built on first use.
pub fn default_relations() -> &'static [Relation] {
    &DEFAULT_RELATIONS
}
