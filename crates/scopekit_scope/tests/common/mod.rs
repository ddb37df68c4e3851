//! Shared helpers for the analyzer integration tests.

#![allow(dead_code)]

use scopekit_ast::{Ast, NodeId};
use scopekit_options::{Environments, LanguageOptions};
use scopekit_scope::{analyze, Reference, Scope, ScopeManager, VariableId};

/// Analyze with default options and the built-in environments.
pub fn analyze_default(ast: &Ast) -> ScopeManager {
    analyze_with(ast, &LanguageOptions::default())
}

pub fn analyze_with(ast: &Ast, options: &LanguageOptions) -> ScopeManager {
    analyze(ast, options, &Environments::builtin()).expect("analysis failed")
}

/// Scope kinds in creation order.
pub fn kinds(manager: &ScopeManager) -> Vec<&'static str> {
    manager.scopes().iter().map(|scope| scope.kind.as_str()).collect()
}

/// Names of the variables declared in `scope`, in declaration order.
pub fn variable_names(manager: &ScopeManager, scope: &Scope) -> Vec<String> {
    scope.variables().map(|id| manager.name(id).to_string()).collect()
}

/// Names of the references that passed through `scope` unresolved.
pub fn through_names(manager: &ScopeManager, scope: &Scope) -> Vec<String> {
    scope
        .through
        .iter()
        .map(|&id| manager.interner().resolve(manager.reference(id).name).to_string())
        .collect()
}

/// The reference created for the identifier `node`.
pub fn reference_at(manager: &ScopeManager, node: NodeId) -> &Reference {
    manager
        .references()
        .iter()
        .find(|reference| reference.identifier == node)
        .unwrap_or_else(|| panic!("no reference at {node}"))
}

/// Every reference created for the identifier `node`, in creation order.
pub fn references_at(manager: &ScopeManager, node: NodeId) -> Vec<&Reference> {
    manager
        .references()
        .iter()
        .filter(|reference| reference.identifier == node)
        .collect()
}

pub fn declared_names(manager: &ScopeManager, variables: &[VariableId]) -> Vec<String> {
    variables.iter().map(|&id| manager.name(id).to_string()).collect()
}
