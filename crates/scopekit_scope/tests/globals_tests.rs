//! Merging environment presets, configured globals and directive comments
//! into the global scope.

mod common;

use common::*;
use scopekit_ast::*;
use scopekit_options::{EnvironmentPreset, Environments, GlobalValue, LanguageOptions};
use scopekit_scope::{analyze, ScopeManager};

fn read_program(b: &mut AstBuilder, source_type: SourceType, names: &[&str]) -> (NodeId, Vec<NodeId>) {
    let idents: Vec<NodeId> = names.iter().map(|name| b.ident(name)).collect();
    let body = idents.iter().map(|&ident| b.expr_stmt(ident)).collect();
    (b.program(source_type, body), idents)
}

fn custom_environments() -> Environments {
    let mut envs = Environments::new();
    envs.register("first", EnvironmentPreset::new(["shared", "onlyFirst"], Vec::<String>::new()));
    envs.register("second", EnvironmentPreset::new(Vec::<String>::new(), ["shared"]));
    envs
}

fn writeable(manager: &ScopeManager, name: &str) -> Option<bool> {
    manager
        .global_variable(name)
        .and_then(|variable| manager.variable(variable).writeable)
}

// ============================================================================
// Environment presets
// ============================================================================

#[test]
fn test_preset_globals_resolve_references() {
    let mut b = AstBuilder::new();
    let (program, idents) = read_program(&mut b, SourceType::Script, &["Promise", "unknownThing"]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_env("builtin");
    let manager = analyze_with(&ast, &options);

    let promise = manager.global_variable("Promise").expect("preset global");
    let variable = manager.variable(promise);
    assert!(variable.defs.is_empty());
    assert!(!variable.is_declared());
    assert_eq!(variable.writeable, Some(false));
    assert_eq!(variable.implicit_global_setting, Some(GlobalValue::Readonly));
    assert!(!variable.explicit_global);
    assert_eq!(variable.references, vec![reference_at(&manager, idents[0]).id]);

    assert_eq!(reference_at(&manager, idents[0]).resolved, Some(promise));
    assert!(reference_at(&manager, idents[1]).resolved.is_none());
    assert_eq!(through_names(&manager, manager.global_scope()), vec!["unknownThing"]);
}

#[test]
fn test_preset_writable_names() {
    let mut b = AstBuilder::new();
    let program = b.program(SourceType::Script, vec![]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_env("commonjs");
    let manager = analyze_with(&ast, &options);

    assert_eq!(writeable(&manager, "exports"), Some(true));
    assert_eq!(writeable(&manager, "require"), Some(false));
    let exports = manager.variable(manager.global_variable("exports").expect("preset global"));
    assert_eq!(exports.implicit_global_setting, Some(GlobalValue::Writable));
}

#[test]
fn test_first_preset_wins() {
    let mut b = AstBuilder::new();
    let program = b.program(SourceType::Script, vec![]);
    let ast = b.finish(program);
    let envs = custom_environments();

    let options = LanguageOptions::default().with_env("first").with_env("second");
    let manager = analyze(&ast, &options, &envs).expect("analysis");
    assert_eq!(writeable(&manager, "shared"), Some(false));
    assert_eq!(writeable(&manager, "onlyFirst"), Some(false));

    let options = LanguageOptions::default().with_env("second").with_env("first");
    let manager = analyze(&ast, &options, &envs).expect("analysis");
    assert_eq!(writeable(&manager, "shared"), Some(true));

    let names = variable_names(&manager, manager.global_scope());
    assert_eq!(names, vec!["shared", "onlyFirst"]);
}

#[test]
fn test_unknown_environment_is_ignored() {
    let mut b = AstBuilder::new();
    let program = b.program(SourceType::Script, vec![]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_env("no-such-env");
    let manager = analyze_with(&ast, &options);

    assert!(variable_names(&manager, manager.global_scope()).is_empty());
}

#[test]
fn test_declared_binding_shadows_preset() {
    let mut b = AstBuilder::new();
    let declaration = b.declare(VariableKind::Let, "Promise", None);
    let program = b.program(SourceType::Script, vec![declaration]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_env("builtin");
    let manager = analyze_with(&ast, &options);

    let promise = manager.variable(manager.global_variable("Promise").expect("declared"));
    assert!(promise.is_declared());
    assert_eq!(promise.writeable, None);
    assert_eq!(promise.implicit_global_setting, None);
}

#[test]
fn test_module_references_reach_preset_globals() {
    let mut b = AstBuilder::new();
    let console = b.ident("console");
    let member = b.member(console, "log");
    let call = b.call(member, vec![]);
    let stmt = b.expr_stmt(call);
    let program = b.program(SourceType::Module, vec![stmt]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_env("node");
    let manager = analyze_with(&ast, &options);

    let reference = reference_at(&manager, console);
    assert_eq!(reference.resolved, manager.global_variable("console"));
    assert_ne!(reference.from, manager.global_scope().id);
    assert!(manager.global_scope().through.is_empty());
}

// ============================================================================
// Configured globals
// ============================================================================

#[test]
fn test_off_override_suppresses_preset() {
    let mut b = AstBuilder::new();
    let (program, idents) = read_program(&mut b, SourceType::Script, &["Promise"]);
    let ast = b.finish(program);
    let options = LanguageOptions::default()
        .with_env("builtin")
        .with_global("Promise", GlobalValue::Off);
    let manager = analyze_with(&ast, &options);

    assert!(manager.global_variable("Promise").is_none());
    assert!(manager.global_variable("Array").is_some());
    assert!(!reference_at(&manager, idents[0]).is_resolved());
}

#[test]
fn test_writable_override_replaces_preset() {
    let mut b = AstBuilder::new();
    let program = b.program(SourceType::Script, vec![]);
    let ast = b.finish(program);
    let options = LanguageOptions::default()
        .with_env("builtin")
        .with_global("Promise", GlobalValue::Writable);
    let manager = analyze_with(&ast, &options);

    let promise = manager.variable(manager.global_variable("Promise").expect("configured"));
    assert_eq!(promise.writeable, Some(true));
    assert_eq!(promise.implicit_global_setting, Some(GlobalValue::Writable));
    assert!(!promise.explicit_global);
    assert!(promise.explicit_global_comments.is_empty());
}

#[test]
fn test_configured_global_exists_without_references() {
    let mut b = AstBuilder::new();
    let program = b.program(SourceType::Script, vec![]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_global("unusedGlobal", GlobalValue::Readonly);
    let manager = analyze_with(&ast, &options);

    let variable = manager.variable(manager.global_variable("unusedGlobal").expect("configured"));
    assert!(variable.references.is_empty());
    assert_eq!(variable.writeable, Some(false));
    assert_eq!(variable.implicit_global_setting, Some(GlobalValue::Readonly));
}

#[test]
fn test_configuration_never_replaces_declarations() {
    let mut b = AstBuilder::new();
    b.block_comment(" global foo:writable ");
    let declaration = b.declare(VariableKind::Var, "foo", None);
    let program = b.program(SourceType::Script, vec![declaration]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_global("foo", GlobalValue::Writable);
    let manager = analyze_with(&ast, &options);

    let foo = manager.variable(manager.global_variable("foo").expect("declared"));
    assert_eq!(foo.defs.len(), 1);
    assert_eq!(foo.writeable, None);
    assert_eq!(foo.implicit_global_setting, None);
    assert!(!foo.explicit_global);
    assert!(foo.explicit_global_comments.is_empty());
}

// ============================================================================
// Directive comments
// ============================================================================

#[test]
fn test_inline_globals() {
    let mut b = AstBuilder::new();
    let first = b.block_comment(" global a:writable, b ");
    b.block_comment(" global c:off ");
    b.line_comment(" global lineOnly ");
    let (program, idents) = read_program(&mut b, SourceType::Script, &["a", "b", "c"]);
    let ast = b.finish(program);
    let manager = analyze_default(&ast);

    let a = manager.variable(manager.global_variable("a").expect("inline global"));
    assert_eq!(a.writeable, Some(true));
    assert!(a.explicit_global);
    assert_eq!(a.explicit_global_comments, vec![first]);
    assert_eq!(a.implicit_global_setting, None);

    let b_var = manager.variable(manager.global_variable("b").expect("inline global"));
    assert_eq!(b_var.writeable, Some(false));
    assert!(b_var.explicit_global);

    assert!(manager.global_variable("c").is_none());
    assert!(manager.global_variable("lineOnly").is_none());
    assert_eq!(reference_at(&manager, idents[0]).resolved, Some(a.id));
    assert!(!reference_at(&manager, idents[2]).is_resolved());
}

#[test]
fn test_inline_global_overrides_configured_value() {
    let mut b = AstBuilder::new();
    let comment = b.block_comment(" global g:writable ");
    let program = b.program(SourceType::Script, vec![]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_global("g", GlobalValue::Readonly);
    let manager = analyze_with(&ast, &options);

    let g = manager.variable(manager.global_variable("g").expect("configured"));
    assert_eq!(g.writeable, Some(true));
    assert!(g.explicit_global);
    assert_eq!(g.explicit_global_comments, vec![comment]);
    assert_eq!(g.implicit_global_setting, Some(GlobalValue::Readonly));
}

#[test]
fn test_inline_off_keeps_configured_global() {
    let mut b = AstBuilder::new();
    b.block_comment(" global g:off ");
    let program = b.program(SourceType::Script, vec![]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_global("g", GlobalValue::Readonly);
    let manager = analyze_with(&ast, &options);

    let g = manager.variable(manager.global_variable("g").expect("configured"));
    assert_eq!(g.writeable, Some(false));
    assert!(!g.explicit_global);
}

#[test]
fn test_repeated_inline_global_collects_comments() {
    let mut b = AstBuilder::new();
    let first = b.block_comment(" global shared:writable ");
    let second = b.block_comment(" globals shared ");
    let program = b.program(SourceType::Script, vec![]);
    let ast = b.finish(program);
    let manager = analyze_default(&ast);

    let shared = manager.variable(manager.global_variable("shared").expect("inline global"));
    assert_eq!(shared.writeable, Some(false));
    assert_eq!(shared.explicit_global_comments, vec![first, second]);
}

#[test]
fn test_exported_marks_existing_globals() {
    let mut b = AstBuilder::new();
    b.block_comment(" exported foo, bar ");
    let declaration = b.declare(VariableKind::Var, "foo", None);
    let program = b.program(SourceType::Script, vec![declaration]);
    let ast = b.finish(program);
    let manager = analyze_default(&ast);

    let foo = manager.variable(manager.global_variable("foo").expect("declared"));
    assert!(foo.used);
    assert!(foo.exported);
    assert!(manager.global_variable("bar").is_none());
}

// ============================================================================
// Implicit globals
// ============================================================================

#[test]
fn test_configured_name_is_not_implicit() {
    let mut b = AstBuilder::new();
    let x = b.ident("x");
    let one = b.number(1.0);
    let assign = b.assign(x, one);
    let x_stmt = b.expr_stmt(assign);
    let y = b.ident("y");
    let two = b.number(2.0);
    let assign = b.assign(y, two);
    let y_stmt = b.expr_stmt(assign);
    let program = b.program(SourceType::Script, vec![x_stmt, y_stmt]);
    let ast = b.finish(program);
    let options = LanguageOptions::default().with_global("x", GlobalValue::Writable);
    let manager = analyze_with(&ast, &options);

    let implicit: Vec<_> = manager.implicit_globals().map(|v| manager.name(v).to_string()).collect();
    assert_eq!(implicit, vec!["y"]);
    assert_eq!(reference_at(&manager, x).resolved, manager.global_variable("x"));

    let left = &manager.global_scope().implicit.as_ref().expect("global").left;
    assert_eq!(left, &vec![reference_at(&manager, y).id]);
    assert_eq!(through_names(&manager, manager.global_scope()), vec!["y"]);
}

#[test]
fn test_inline_writable_global_replaces_implicit() {
    // /* global foo: writable */ foo = bar;
    let mut b = AstBuilder::new();
    b.block_comment(" global foo: writable ");
    let foo = b.ident("foo");
    let bar = b.ident("bar");
    let assign = b.assign(foo, bar);
    let stmt = b.expr_stmt(assign);
    let program = b.program(SourceType::Script, vec![stmt]);
    let ast = b.finish(program);
    let manager = analyze_default(&ast);

    let global = manager.global_variable("foo").expect("inline global");
    let variable = manager.variable(global);
    assert_eq!(variable.writeable, Some(true));
    assert!(variable.defs.is_empty());
    assert!(variable.explicit_global);
    assert_eq!(reference_at(&manager, foo).resolved, Some(global));
    assert!(reference_at(&manager, foo).is_write_only());

    assert_eq!(manager.implicit_globals().count(), 0);
    let left = &manager.global_scope().implicit.as_ref().expect("global").left;
    assert_eq!(left, &vec![reference_at(&manager, bar).id]);
    assert_eq!(through_names(&manager, manager.global_scope()), vec!["bar"]);
}
