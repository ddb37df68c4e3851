//! The query façade used by a lint driver.
//!
//! A `ScopeSession` holds at most one file. Its scope manager is built on the
//! first query after `init` and reused until `reset` or the next `init`; a
//! failed build keeps failing with the same error until then.

use crate::analyze::analyze;
use crate::error::ScopeError;
use crate::manager::ScopeManager;
use crate::scope::Scope;
use crate::variable::VariableId;
use scopekit_ast::{Ast, NodeId};
use scopekit_options::{Environments, LanguageOptions};
use tracing::debug;

struct ActiveFile<'a> {
    ast: &'a Ast,
    options: &'a LanguageOptions,
    environments: &'a Environments,
    /// The outcome of the one build, failed or not.
    built: Option<Result<ScopeManager, ScopeError>>,
}

#[derive(Default)]
pub struct ScopeSession<'a> {
    file: Option<ActiveFile<'a>>,
}

impl<'a> ScopeSession<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a file, discarding any previously loaded one. Nothing is built
    /// until the first query.
    pub fn init(&mut self, ast: &'a Ast, options: &'a LanguageOptions, environments: &'a Environments) {
        self.file = Some(ActiveFile {
            ast,
            options,
            environments,
            built: None,
        });
    }

    /// Discard the loaded file and everything built from it.
    pub fn reset(&mut self) {
        if self.file.take().is_some() {
            debug!("scope session reset");
        }
    }

    pub fn is_active(&self) -> bool {
        self.file.is_some()
    }

    pub fn ast(&self) -> Option<&'a Ast> {
        self.file.as_ref().map(|file| file.ast)
    }

    /// Whether the loaded file has been analyzed, successfully or not.
    pub fn is_built(&self) -> bool {
        self.file.as_ref().is_some_and(|file| file.built.is_some())
    }

    /// The scope manager of the loaded file, built on first use.
    pub fn manager(&mut self) -> Result<&ScopeManager, ScopeError> {
        Ok(self.loaded()?.1)
    }

    pub fn scopes(&mut self) -> Result<&[Scope], ScopeError> {
        Ok(self.manager()?.scopes())
    }

    pub fn global_scope(&mut self) -> Result<&Scope, ScopeError> {
        Ok(self.manager()?.global_scope())
    }

    /// Variables declared by `node`, e.g. a declaration, declarator,
    /// function, class, import specifier or catch clause.
    pub fn get_declared_variables(&mut self, node: NodeId) -> Result<&[VariableId], ScopeError> {
        let (ast, manager) = self.loaded()?;
        check_node(ast, node)?;
        Ok(manager.get_declared_variables(node))
    }

    /// The scope anchored at `node`; see [`ScopeManager::acquire`].
    pub fn acquire(&mut self, node: NodeId, inner: bool) -> Result<Option<&Scope>, ScopeError> {
        let (ast, manager) = self.loaded()?;
        check_node(ast, node)?;
        Ok(manager.acquire(node, inner).map(|id| manager.scope(id)))
    }

    /// The innermost scope containing `node`.
    pub fn get_scope(&mut self, node: NodeId) -> Result<&Scope, ScopeError> {
        let (ast, manager) = self.loaded()?;
        check_node(ast, node)?;
        let inner = !ast.kind(node).is_program();
        let scope = std::iter::once(node)
            .chain(ast.ancestors(node))
            .find_map(|candidate| manager.acquire(candidate, inner));
        Ok(scope.map_or_else(|| manager.global_scope(), |id| manager.scope(id)))
    }

    /// Whether `node` is an identifier referring to a global that the source
    /// does not declare.
    pub fn is_global_reference(&mut self, node: NodeId) -> Result<bool, ScopeError> {
        let (ast, manager) = self.loaded()?;
        check_node(ast, node)?;
        let Some(name) = ast.identifier_name(node) else {
            return Ok(false);
        };
        let Some(variable) = manager.global_scope().variable(name) else {
            return Ok(false);
        };
        let variable = manager.variable(variable);
        Ok(variable.defs.is_empty()
            && variable
                .references
                .iter()
                .any(|&reference| manager.reference(reference).identifier == node))
    }

    pub fn mark_variable_used(&mut self, _name: &str, _node: NodeId) -> Result<bool, ScopeError> {
        Err(ScopeError::NotImplemented("mark_variable_used"))
    }

    fn loaded(&mut self) -> Result<(&'a Ast, &ScopeManager), ScopeError> {
        debug_assert!(self.file.is_some(), "no file loaded: call ScopeSession::init before querying");
        let file = self.file.as_mut().ok_or(ScopeError::NoActiveFile)?;
        let (ast, options, environments) = (file.ast, file.options, file.environments);
        let built = file.built.get_or_insert_with(|| {
            let built = analyze(ast, options, environments);
            if let Err(err) = &built {
                debug!(%err, "analysis failed");
            }
            built
        });
        match built {
            Ok(manager) => Ok((ast, &*manager)),
            Err(err) => Err(err.clone()),
        }
    }
}

fn check_node(ast: &Ast, node: NodeId) -> Result<(), ScopeError> {
    if ast.contains(node) {
        Ok(())
    } else {
        Err(ScopeError::InvalidArgument(format!(
            "node {node} is not part of the loaded tree ({} nodes)",
            ast.len()
        )))
    }
}
