//! scopekit_scope: scope analysis for JavaScript.
//!
//! Walks a `scopekit_ast::Ast` once, creating nested scopes and variables,
//! and resolves every identifier reference to a declaration, a configured
//! global, or nothing. The result is a `ScopeManager`; `ScopeSession` wraps
//! it with lazy building and one-file-at-a-time lifetime.

mod analyze;
mod directives;
mod error;
mod globals;
mod manager;
mod pattern;
mod reference;
mod referencer;
mod scope;
mod session;
mod variable;

pub use analyze::analyze;
pub use directives::{is_identifier_name, parse_directives, DirectiveComments, InlineGlobal};
pub use error::ScopeError;
pub use manager::ScopeManager;
pub use reference::{ImplicitGlobalSite, Reference, ReferenceFlags, ReferenceId};
pub use scope::{ImplicitGlobals, Scope, ScopeId, ScopeKind};
pub use session::ScopeSession;
pub use variable::{Definition, DefinitionKind, Variable, VariableId};
