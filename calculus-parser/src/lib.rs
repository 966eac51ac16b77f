//! Expression trees for the calculus engine: the [`Node`](node::Node) model, a parser from infix
//! text, and a renderer back to fully parenthesized text.
//!
//! ```
//! use calculus_parser::{parse, render};
//!
//! let tree = parse("x^2 + x*y^3 + 2").unwrap();
//! assert_eq!(render(&tree), "((x^2)+(x*(y^3))+2)");
//! ```

pub mod fmt;
pub mod node;
pub mod parser;
pub mod tokenizer;

pub use fmt::render;
pub use node::{Internal, Leaf, Node, OpKind};
pub use parser::{error::Error, parse, Parser};
