//! scopekit_ast: ESTree-shaped syntax tree consumed by the scope analyzer.
//!
//! Nodes live in a flat arena addressed by `NodeId`; every node records its
//! parent so that queries can walk upward from any node. Parsers (or tests)
//! produce an `Ast` through `AstBuilder`.

pub mod ast;
pub mod builder;
pub mod generated;
pub mod node;
pub mod types;
pub mod visitor;

// Re-export key types
pub use ast::{Ast, Comment};
pub use builder::AstBuilder;
pub use node::*;
pub use types::*;
