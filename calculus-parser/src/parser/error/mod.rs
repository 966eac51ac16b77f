pub mod kind;

pub use calculus_error::Error;
