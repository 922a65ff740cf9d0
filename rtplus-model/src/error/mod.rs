//! Error types

mod field;
mod validation;

pub use field::*;
pub use validation::*;
