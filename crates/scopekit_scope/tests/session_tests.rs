//! The per-file query session.

mod common;

use common::*;
use scopekit_ast::*;
use scopekit_options::{Environments, LanguageOptions};
use scopekit_scope::{analyze, ReferenceId, ScopeError, ScopeId, ScopeKind, ScopeManager, ScopeSession, VariableId};

/// `function f(a) { a; { let b; b; } }`, returning the program and the
/// identifiers `a` (read) and `b` (read).
fn function_program(b: &mut AstBuilder) -> (NodeId, NodeId, NodeId) {
    let a = b.ident("a");
    let a_read = b.ident("a");
    let a_stmt = b.expr_stmt(a_read);
    let let_b = b.declare(VariableKind::Let, "b", None);
    let b_read = b.ident("b");
    let b_stmt = b.expr_stmt(b_read);
    let block = b.block(vec![let_b, b_stmt]);
    let f = b.function_decl(Some("f"), vec![a], vec![a_stmt, block]);
    let program = b.program(SourceType::Script, vec![f]);
    (program, a_read, b_read)
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_manager_is_built_once() {
    let mut b = AstBuilder::new();
    let (program, _, _) = function_program(&mut b);
    let ast = b.finish(program);
    let options = LanguageOptions::default();
    let envs = Environments::builtin();

    let mut session = ScopeSession::new();
    assert!(!session.is_active());
    session.init(&ast, &options, &envs);
    assert!(session.is_active());
    assert!(session.ast().is_some_and(|loaded| std::ptr::eq(loaded, &ast)));

    let first: *const ScopeManager = session.manager().expect("analysis");
    let second: *const ScopeManager = session.manager().expect("analysis");
    assert!(std::ptr::eq(first, second));
    assert_eq!(session.scopes().expect("analysis").len(), 3);
    assert!(session.global_scope().expect("analysis").is_global());
}

#[test]
fn test_reset_and_reinit() {
    let mut b = AstBuilder::new();
    let (program, _, _) = function_program(&mut b);
    let first_ast = b.finish(program);

    let mut b = AstBuilder::new();
    let program = b.program(SourceType::Module, vec![]);
    let second_ast = b.finish(program);

    let options = LanguageOptions::default();
    let envs = Environments::builtin();
    let mut session = ScopeSession::new();

    session.init(&first_ast, &options, &envs);
    assert_eq!(session.scopes().expect("analysis").len(), 3);
    session.reset();
    assert!(!session.is_active());
    assert!(session.ast().is_none());

    session.init(&second_ast, &options, &envs);
    let kinds: Vec<_> = session
        .scopes()
        .expect("analysis")
        .iter()
        .map(|scope| scope.kind)
        .collect();
    assert_eq!(kinds, vec![ScopeKind::Global, ScopeKind::Module]);
}

#[test]
fn test_init_replaces_loaded_file() {
    let mut b = AstBuilder::new();
    let (program, _, _) = function_program(&mut b);
    let first_ast = b.finish(program);

    let mut b = AstBuilder::new();
    let program = b.program(SourceType::Script, vec![]);
    let second_ast = b.finish(program);

    let options = LanguageOptions::default();
    let envs = Environments::builtin();
    let mut session = ScopeSession::new();
    session.init(&first_ast, &options, &envs);
    assert_eq!(session.scopes().expect("analysis").len(), 3);
    session.init(&second_ast, &options, &envs);
    assert_eq!(session.scopes().expect("analysis").len(), 1);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "no file loaded")]
fn test_query_without_file_panics_in_debug() {
    let mut session = ScopeSession::new();
    let _ = session.manager();
}

#[cfg(not(debug_assertions))]
#[test]
fn test_query_without_file_fails() {
    let mut session = ScopeSession::new();
    assert_eq!(session.manager().err(), Some(ScopeError::NoActiveFile));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_get_scope() {
    let mut b = AstBuilder::new();
    let (program, a_read, b_read) = function_program(&mut b);
    let ast = b.finish(program);
    let options = LanguageOptions::default();
    let envs = Environments::builtin();
    let mut session = ScopeSession::new();
    session.init(&ast, &options, &envs);

    let scope = session.get_scope(a_read).expect("known node");
    assert_eq!(scope.kind, ScopeKind::Function);
    assert_eq!(scope.id, ScopeId(1));

    let scope = session.get_scope(b_read).expect("known node");
    assert_eq!(scope.kind, ScopeKind::Block);

    let scope = session.get_scope(program).expect("known node");
    assert!(scope.is_global());
}

#[test]
fn test_get_scope_in_module_and_commonjs() {
    let mut b = AstBuilder::new();
    let x = b.ident("x");
    let stmt = b.expr_stmt(x);
    let program = b.program(SourceType::Module, vec![stmt]);
    let module_ast = b.finish(program);

    let mut b = AstBuilder::new();
    let y = b.ident("y");
    let stmt = b.expr_stmt(y);
    let program = b.program(SourceType::CommonJs, vec![stmt]);
    let commonjs_ast = b.finish(program);

    let options = LanguageOptions::default();
    let envs = Environments::builtin();
    let mut session = ScopeSession::new();

    session.init(&module_ast, &options, &envs);
    assert_eq!(session.get_scope(x).expect("known node").kind, ScopeKind::Module);
    assert_eq!(
        session.get_scope(module_ast.root()).expect("known node").kind,
        ScopeKind::Global
    );

    session.init(&commonjs_ast, &options, &envs);
    assert_eq!(session.get_scope(y).expect("known node").kind, ScopeKind::Function);
    assert_eq!(
        session.get_scope(commonjs_ast.root()).expect("known node").kind,
        ScopeKind::Global
    );
}

#[test]
fn test_repeated_queries_return_the_same_scope() {
    let mut b = AstBuilder::new();
    let (program, a_read, b_read) = function_program(&mut b);
    let ast = b.finish(program);
    let options = LanguageOptions::default();
    let envs = Environments::builtin();
    let mut session = ScopeSession::new();
    session.init(&ast, &options, &envs);

    let f = ast.ancestors(a_read).nth(2).expect("function");
    let first = session.acquire(f, false).expect("known node").map(|scope| scope.id);
    let second = session.acquire(f, false).expect("known node").map(|scope| scope.id);
    assert_eq!(first, Some(ScopeId(1)));
    assert_eq!(first, second);

    let first = session.get_scope(b_read).expect("known node").id;
    let second = session.get_scope(b_read).expect("known node").id;
    assert_eq!(first, second);
    assert_eq!(session.scopes().expect("analysis").len(), 3);
}

#[test]
fn test_acquire_and_declared_variables() {
    let mut b = AstBuilder::new();
    let (program, a_read, _) = function_program(&mut b);
    let ast = b.finish(program);
    let options = LanguageOptions::default();
    let envs = Environments::builtin();
    let mut session = ScopeSession::new();
    session.init(&ast, &options, &envs);

    let f = ast.parent(ast.parent(a_read).expect("statement")).and_then(|body| ast.parent(body));
    let f = f.expect("function");
    assert!(matches!(ast.kind(f), NodeKind::FunctionDeclaration(_)));

    let scope = session.acquire(f, false).expect("known node");
    assert_eq!(scope.map(|scope| scope.kind), Some(ScopeKind::Function));
    assert!(session.acquire(a_read, false).expect("known node").is_none());

    let declared = session.get_declared_variables(f).expect("known node").to_vec();
    let manager = session.manager().expect("analysis");
    assert_eq!(declared_names(manager, &declared), vec!["f", "a"]);
}

#[test]
fn test_is_global_reference() {
    let mut b = AstBuilder::new();
    let promise = b.ident("Promise");
    let promise_stmt = b.expr_stmt(promise);
    let declaration = b.declare(VariableKind::Var, "v", None);
    let v = b.ident("v");
    let v_stmt = b.expr_stmt(v);
    let missing = b.ident("missing");
    let missing_stmt = b.expr_stmt(missing);
    let program = b.program(SourceType::Script, vec![promise_stmt, declaration, v_stmt, missing_stmt]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_env("builtin");
    let envs = Environments::builtin();
    let mut session = ScopeSession::new();
    session.init(&ast, &options, &envs);

    assert_eq!(session.is_global_reference(promise), Ok(true));
    assert_eq!(session.is_global_reference(v), Ok(false));
    assert_eq!(session.is_global_reference(missing), Ok(false));
    assert_eq!(session.is_global_reference(promise_stmt), Ok(false));
}

#[test]
fn test_foreign_node_is_invalid_argument() {
    let mut b = AstBuilder::new();
    let (program, _, _) = function_program(&mut b);
    let ast = b.finish(program);
    let options = LanguageOptions::default();
    let envs = Environments::builtin();
    let mut session = ScopeSession::new();
    session.init(&ast, &options, &envs);

    let foreign = NodeId(10_000);
    assert!(matches!(session.get_scope(foreign), Err(ScopeError::InvalidArgument(_))));
    assert!(matches!(session.acquire(foreign, true), Err(ScopeError::InvalidArgument(_))));
    assert!(matches!(
        session.get_declared_variables(foreign),
        Err(ScopeError::InvalidArgument(_))
    ));
    assert!(matches!(
        session.is_global_reference(foreign),
        Err(ScopeError::InvalidArgument(_))
    ));
}

#[test]
fn test_manager_lookups_by_id() {
    let mut b = AstBuilder::new();
    let (program, a_read, _) = function_program(&mut b);
    let ast = b.finish(program);
    let manager = analyze_default(&ast);

    let reference = reference_at(&manager, a_read).id;
    assert_eq!(manager.get_reference(reference).map(|r| r.identifier), Some(a_read));
    assert!(manager.get_reference(ReferenceId(u32::MAX)).is_none());
    assert!(manager.get_scope(ScopeId(1)).is_some_and(|scope| scope.kind == ScopeKind::Function));
    assert!(manager.get_scope(ScopeId(99)).is_none());
    let f = manager.global_variable("f").expect("declared");
    assert_eq!(manager.get_variable(f).map(|v| v.id), Some(f));
    assert!(manager.get_variable(VariableId(99)).is_none());
}

#[test]
fn test_mark_variable_used_is_not_implemented() {
    let mut b = AstBuilder::new();
    let (program, a_read, _) = function_program(&mut b);
    let ast = b.finish(program);
    let options = LanguageOptions::default();
    let envs = Environments::builtin();
    let mut session = ScopeSession::new();
    session.init(&ast, &options, &envs);

    assert_eq!(
        session.mark_variable_used("a", a_read),
        Err(ScopeError::NotImplemented("mark_variable_used"))
    );
}

// ============================================================================
// Analysis errors
// ============================================================================

#[test]
fn test_import_in_script_is_an_error() {
    let mut b = AstBuilder::new();
    let specifier = b.import_default("a");
    let import = b.import_decl(vec![specifier], "m");
    let program = b.program(SourceType::Script, vec![import]);
    let ast = b.finish(program);
    let options = LanguageOptions::default();
    let module = LanguageOptions::default().with_source_type(SourceType::Module);
    let envs = Environments::builtin();

    assert_eq!(
        analyze(&ast, &options, &envs).err(),
        Some(ScopeError::ImportOutsideModule(import))
    );

    let mut session = ScopeSession::new();
    session.init(&ast, &options, &envs);
    assert!(!session.is_built());
    assert_eq!(session.manager().err(), Some(ScopeError::ImportOutsideModule(import)));
    assert!(session.is_built());
    assert_eq!(session.get_scope(import).err(), Some(ScopeError::ImportOutsideModule(import)));

    session.init(&ast, &module, &envs);
    assert!(!session.is_built());
    assert_eq!(session.scopes().expect("analysis").len(), 2);

    let manager = analyze_with(&ast, &module);
    assert_eq!(kinds(&manager), vec!["global", "module"]);
}

#[test]
fn test_root_must_be_program() {
    let mut b = AstBuilder::new();
    let x = b.ident("x");
    let stmt = b.expr_stmt(x);
    let ast = b.finish(stmt);

    let result = analyze(&ast, &LanguageOptions::default(), &Environments::builtin());
    assert!(matches!(result, Err(ScopeError::InvalidArgument(_))));
}
