//! Whole-file analysis.

use crate::directives::parse_directives;
use crate::error::ScopeError;
use crate::globals::finalize_globals;
use crate::manager::ScopeManager;
use crate::referencer::Referencer;
use scopekit_ast::Ast;
use scopekit_options::{Environments, LanguageOptions};
use tracing::{debug, debug_span};

/// Build the scope tree of `ast`, resolve its references and merge the
/// configured globals.
pub fn analyze(ast: &Ast, options: &LanguageOptions, environments: &Environments) -> Result<ScopeManager, ScopeError> {
    let span = debug_span!("analyze", nodes = ast.len(), comments = ast.comments().len());
    let _enter = span.enter();

    let mut manager = ScopeManager::new(ast.interner().clone());
    Referencer::new(ast, &mut manager, options).visit_program()?;

    let directives = parse_directives(ast);
    finalize_globals(&mut manager, options, environments, &directives);

    debug!(
        scopes = manager.scopes().len(),
        variables = manager.variables().len(),
        references = manager.references().len(),
        "analyzed"
    );
    Ok(manager)
}
