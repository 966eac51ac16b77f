//! Symbolic calculus on the expression trees produced by [`calculus_parser`].
//!
//! This crate builds derivatives of expressions and simplifies the results with a set of rewrite
//! relations and constant folding. See the [`symbolic`] module for details.

pub mod symbolic;
