#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single change made by the simplifier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Step {
    /// A node whose operands were all numbers was replaced by its value.
    ///
    /// `2+3*4` becomes `14`
    Fold {
        /// The rendered node before folding.
        expr: String,

        /// The computed value.
        value: f64,
    },

    /// A relation rewrote a node.
    ///
    /// `(x*1)` becomes `x`
    Rewrite {
        /// The index of the relation in the slice given to the simplifier.
        relation: usize,

        /// The rendered node before the rewrite.
        before: String,

        /// The rendered node after the rewrite.
        after: String,
    },
}
