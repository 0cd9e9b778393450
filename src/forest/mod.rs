//! Forest assembly
//!
//! Turns the flat token sequence produced by the lexer into an ordered
//! sequence of first-child/next-sibling trees, one per top-level
//! expression, by resolving bracket nesting with an explicit stack.

mod builder;
mod tree;

pub use builder::ForestBuilder;
pub use tree::Forest;
