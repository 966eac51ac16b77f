//! Symbolic manipulation of expression trees.
//!
//! # Differentiation
//!
//! [`derivative()`] builds the derivative of a [`Node`](calculus_parser::Node) with respect to a
//! named variable, using the sum, product, quotient and power rules. The result is exact but
//! verbose, with factors such as `(x*0)` and exponents such as `(2-1)` left in place.
//!
//! # Simplification
//!
//! [`simplify()`] cleans up such trees. It folds operators whose operands are all numbers, and
//! rewrites nodes with an ordered list of [`Relation`]s, each pairing a pattern with its
//! replacement. The relations used to tidy up derivatives are available through
//! [`relation::rules::default_relations`], and custom ones can be parsed from text with
//! [`relation::build_relations`].
//!
//! ```
//! use calculus_compute::symbolic::{derivative, relation::rules::default_relations, simplify};
//! use calculus_parser::{parse, render};
//!
//! let node = parse("x^2 + x*y^3 + 2").unwrap();
//! let d = derivative(&node, "y").unwrap();
//! let simplified = simplify(&d, default_relations()).unwrap();
//! assert_eq!(render(&simplified), "(x*(3*(y^2)))");
//! ```

pub mod derivative;
pub mod error;
pub mod relation;
pub mod simplify;
pub mod step_collector;

pub use derivative::derivative;
pub use relation::Relation;
pub use simplify::{simplify, simplify_once, simplify_with, simplify_with_steps, step::Step};
pub use step_collector::StepCollector;
