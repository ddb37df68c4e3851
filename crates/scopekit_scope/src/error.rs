//! Analyzer errors.

use scopekit_ast::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A query was given a node that does not belong to the loaded tree, or
    /// a tree whose root is not a `Program`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("no file is loaded")]
    NoActiveFile,

    #[error("import declaration {0} outside of module source")]
    ImportOutsideModule(NodeId),
}
