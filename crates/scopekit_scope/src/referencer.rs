//! The referencer: one walk over the tree that creates scopes, defines
//! variables and records references.
//!
//! Handles:
//! - Scope creation for programs, blocks, functions, classes, loops,
//!   `switch`, `catch` and `with`
//! - `var` hoisting to the variable scope
//! - Parameters, defaults and destructuring patterns
//! - Read/write classification of references
//! - Implicit-global candidates in sloppy code
//! - Import bindings and export specifiers

use crate::error::ScopeError;
use crate::manager::ScopeManager;
use crate::pattern::{assignment_parts, is_pattern, walk_pattern, PatternTarget};
use crate::reference::{ImplicitGlobalSite, Reference, ReferenceFlags, ReferenceId};
use crate::scope::{ScopeId, ScopeKind};
use crate::variable::{Definition, DefinitionKind};
use scopekit_ast::*;
use scopekit_options::LanguageOptions;

type VisitResult = Result<(), ScopeError>;

pub(crate) struct Referencer<'a> {
    ast: &'a Ast,
    manager: &'a mut ScopeManager,
    options: &'a LanguageOptions,
    current: Option<ScopeId>,
    /// Set while visiting the value of a class method.
    inner_method_definition: bool,
    is_module: bool,
}

impl<'a> Referencer<'a> {
    pub(crate) fn new(ast: &'a Ast, manager: &'a mut ScopeManager, options: &'a LanguageOptions) -> Self {
        Self {
            ast,
            manager,
            options,
            current: None,
            inner_method_definition: false,
            is_module: false,
        }
    }

    // ========================================================================
    // Scope bookkeeping
    // ========================================================================

    fn current_scope(&self) -> ScopeId {
        self.current.unwrap_or(ScopeId::GLOBAL)
    }

    fn is_strict(&self) -> bool {
        self.manager.scope(self.current_scope()).is_strict
    }

    fn nest(&mut self, kind: ScopeKind, block: NodeId) -> ScopeId {
        self.nest_method(kind, block, false)
    }

    fn nest_method(&mut self, kind: ScopeKind, block: NodeId, is_method_definition: bool) -> ScopeId {
        let id = self
            .manager
            .nest_scope(self.ast, kind, self.current, block, is_method_definition);
        self.current = Some(id);
        id
    }

    /// Close every open scope anchored at `node`.
    fn close(&mut self, node: NodeId) {
        while let Some(scope) = self.current {
            if self.manager.scope(scope).block != node {
                break;
            }
            self.current = self.manager.close_scope(self.ast, scope);
        }
    }

    fn referencing(
        &mut self,
        node: NodeId,
        flags: ReferenceFlags,
        write_expr: Option<NodeId>,
        maybe_implicit_global: Option<ImplicitGlobalSite>,
        partial: bool,
        init: bool,
    ) {
        let Some(name) = self.ast.identifier_name(node) else {
            return;
        };
        let is_write = flags.contains(ReferenceFlags::WRITE);
        self.manager.add_reference(Reference {
            id: ReferenceId(u32::MAX),
            identifier: node,
            name,
            from: self.current_scope(),
            resolved: None,
            flags,
            write_expr: write_expr.filter(|_| is_write),
            partial: is_write && partial,
            init: is_write && init,
            tainted: false,
            maybe_implicit_global,
        });
    }

    /// Write references for each default value wrapping `target`.
    fn referencing_default_value(
        &mut self,
        target: &PatternTarget,
        maybe_implicit_global: Option<ImplicitGlobalSite>,
        init: bool,
    ) {
        for &assignment in &target.assignments {
            if let Some((left, right)) = assignment_parts(self.ast, assignment) {
                self.referencing(
                    target.identifier,
                    ReferenceFlags::WRITE,
                    Some(right),
                    maybe_implicit_global,
                    target.identifier != left,
                    init,
                );
            }
        }
    }

    fn visit_pattern(
        &mut self,
        pattern: NodeId,
        process_right_hand_nodes: bool,
        mut callback: impl FnMut(&mut Self, &PatternTarget),
    ) -> VisitResult {
        let walk = walk_pattern(self.ast, pattern);
        for target in &walk.targets {
            callback(self, target);
        }
        if process_right_hand_nodes {
            for node in walk.right_hand_nodes {
                self.visit(node)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    pub(crate) fn visit_program(&mut self) -> VisitResult {
        let ast = self.ast;
        let root = ast.root();
        let NodeKind::Program(program) = ast.kind(root) else {
            return Err(ScopeError::InvalidArgument(format!(
                "root {root} is a {}, not a Program",
                ast.kind(root).type_name()
            )));
        };
        let global_return = self.options.global_return(program.source_type);
        self.is_module = self.options.is_module(program.source_type);

        let global = self.nest(ScopeKind::Global, root);
        if global_return {
            self.manager.scopes[global.index()].is_strict = false;
            self.nest(ScopeKind::Function, root);
        }
        if self.is_module {
            self.nest(ScopeKind::Module, root);
        }
        if self.options.implied_strict {
            let scope = self.current_scope();
            self.manager.scopes[scope.index()].is_strict = true;
        }

        for &statement in &program.body {
            self.visit(statement)?;
        }
        self.close(root);
        Ok(())
    }

    fn visit_children(&mut self, node: NodeId) -> VisitResult {
        for child in self.ast.kind(node).children() {
            self.visit(child)?;
        }
        Ok(())
    }

    fn visit(&mut self, node: NodeId) -> VisitResult {
        let ast = self.ast;
        match ast.kind(node) {
            NodeKind::Identifier(_) => {
                self.referencing(node, ReferenceFlags::READ, None, None, false, false);
                Ok(())
            }
            NodeKind::PrivateIdentifier(_)
            | NodeKind::Super
            | NodeKind::MetaProperty(_)
            | NodeKind::BreakStatement(_)
            | NodeKind::ContinueStatement(_) => Ok(()),
            NodeKind::ThisExpression => {
                let variable_scope = self.manager.scope(self.current_scope()).variable_scope;
                self.manager.scopes[variable_scope.index()].this_found = true;
                Ok(())
            }

            NodeKind::AssignmentExpression(assignment) => self.visit_assignment(node, assignment),
            NodeKind::UpdateExpression(update) => {
                if is_pattern(ast, update.argument) {
                    self.referencing(update.argument, ReferenceFlags::RW, None, None, false, false);
                    Ok(())
                } else {
                    self.visit_children(node)
                }
            }
            NodeKind::MemberExpression(member) => {
                self.visit(member.object)?;
                if member.computed {
                    self.visit(member.property)?;
                }
                Ok(())
            }
            NodeKind::Property(property) => self.visit_property(property.key, property.value, property.computed, false),
            NodeKind::MethodDefinition(method) => self.visit_property(method.key, method.value, method.computed, true),
            NodeKind::PropertyDefinition(property) => {
                if property.computed {
                    self.visit(property.key)?;
                }
                if let Some(value) = property.value {
                    self.nest(ScopeKind::ClassFieldInitializer, value);
                    self.visit(value)?;
                    self.close(value);
                }
                Ok(())
            }
            NodeKind::StaticBlock(_) => {
                self.nest(ScopeKind::ClassStaticBlock, node);
                self.visit_children(node)?;
                self.close(node);
                Ok(())
            }
            NodeKind::LabeledStatement(labeled) => self.visit(labeled.body),

            NodeKind::BlockStatement(_) => {
                self.nest(ScopeKind::Block, node);
                self.visit_children(node)?;
                self.close(node);
                Ok(())
            }
            NodeKind::ForStatement(for_stmt) => {
                let lexical_init = for_stmt.init.is_some_and(|init| {
                    matches!(ast.kind(init), NodeKind::VariableDeclaration(decl) if !decl.kind.is_var())
                });
                if lexical_init {
                    self.nest(ScopeKind::For, node);
                }
                self.visit_children(node)?;
                self.close(node);
                Ok(())
            }
            NodeKind::ForInStatement(for_in) => self.visit_for_in(node, for_in.left, for_in.right, for_in.body),
            NodeKind::ForOfStatement(for_of) => self.visit_for_in(node, for_of.left, for_of.right, for_of.body),
            NodeKind::SwitchStatement(switch) => {
                self.visit(switch.discriminant)?;
                self.nest(ScopeKind::Switch, node);
                for &case in &switch.cases {
                    self.visit(case)?;
                }
                self.close(node);
                Ok(())
            }
            NodeKind::WithStatement(with) => {
                self.visit(with.object)?;
                self.nest(ScopeKind::With, node);
                self.visit(with.body)?;
                self.close(node);
                Ok(())
            }
            NodeKind::CatchClause(catch) => self.visit_catch(node, catch),

            NodeKind::VariableDeclaration(declaration) => self.visit_variable_declaration(node, declaration),
            NodeKind::FunctionDeclaration(_)
            | NodeKind::FunctionExpression(_)
            | NodeKind::ArrowFunctionExpression(_) => self.visit_function(node),
            NodeKind::ClassDeclaration(class) | NodeKind::ClassExpression(class) => self.visit_class(node, class),

            NodeKind::ImportDeclaration(import) => self.visit_import(node, import),
            NodeKind::ExportNamedDeclaration(export) => {
                if export.source.is_some() {
                    return Ok(());
                }
                match export.declaration {
                    Some(declaration) => self.visit(declaration),
                    None => self.visit_children(node),
                }
            }
            NodeKind::ExportDefaultDeclaration(export) => self.visit(export.declaration),
            NodeKind::ExportAllDeclaration(_) => Ok(()),
            NodeKind::ExportSpecifier(specifier) => self.visit(specifier.local),

            _ => self.visit_children(node),
        }
    }

    fn visit_property(&mut self, key: NodeId, value: NodeId, computed: bool, is_method_definition: bool) -> VisitResult {
        if computed {
            self.visit(key)?;
        }
        let previous = self.inner_method_definition;
        if is_method_definition {
            self.inner_method_definition = true;
        }
        let result = self.visit(value);
        self.inner_method_definition = previous;
        result
    }

    fn visit_assignment(&mut self, node: NodeId, assignment: &AssignmentExpression) -> VisitResult {
        if is_pattern(self.ast, assignment.left) {
            if assignment.operator.is_assign() {
                let strict = self.is_strict();
                let right = assignment.right;
                self.visit_pattern(assignment.left, true, |this, target| {
                    let maybe_implicit_global = (!strict).then_some(ImplicitGlobalSite {
                        pattern: target.identifier,
                        node,
                    });
                    this.referencing_default_value(target, maybe_implicit_global, false);
                    this.referencing(
                        target.identifier,
                        ReferenceFlags::WRITE,
                        Some(right),
                        maybe_implicit_global,
                        !target.top_level,
                        false,
                    );
                })?;
            } else {
                self.referencing(assignment.left, ReferenceFlags::RW, Some(assignment.right), None, false, false);
            }
        } else {
            self.visit(assignment.left)?;
        }
        self.visit(assignment.right)
    }

    fn visit_for_in(&mut self, node: NodeId, left: NodeId, right: NodeId, body: NodeId) -> VisitResult {
        let ast = self.ast;
        let declaration = match ast.kind(left) {
            NodeKind::VariableDeclaration(declaration) => Some(declaration),
            _ => None,
        };
        if declaration.is_some_and(|declaration| !declaration.kind.is_var()) {
            self.nest(ScopeKind::For, node);
        }

        if let Some(declaration) = declaration {
            self.visit(left)?;
            let first = declaration.declarations.first().map(|&declarator| ast.kind(declarator));
            if let Some(NodeKind::VariableDeclarator(declarator)) = first {
                self.visit_pattern(declarator.id, false, |this, target| {
                    this.referencing(target.identifier, ReferenceFlags::WRITE, Some(right), None, true, true);
                })?;
            }
        } else {
            let strict = self.is_strict();
            self.visit_pattern(left, true, |this, target| {
                let maybe_implicit_global = (!strict).then_some(ImplicitGlobalSite {
                    pattern: target.identifier,
                    node,
                });
                this.referencing_default_value(target, maybe_implicit_global, false);
                this.referencing(
                    target.identifier,
                    ReferenceFlags::WRITE,
                    Some(right),
                    maybe_implicit_global,
                    true,
                    false,
                );
            })?;
        }

        self.visit(right)?;
        self.visit(body)?;
        self.close(node);
        Ok(())
    }

    fn visit_catch(&mut self, node: NodeId, catch: &CatchClause) -> VisitResult {
        self.nest(ScopeKind::Catch, node);
        if let Some(param) = catch.param {
            // Each bound name is defined by its own identifier, not by the
            // whole destructuring pattern.
            self.visit_pattern(param, true, |this, target| {
                let scope = this.current_scope();
                let def = Definition::new(DefinitionKind::CatchClause, target.identifier, node);
                this.manager.define(this.ast, scope, target.identifier, def);
                this.referencing_default_value(target, None, true);
            })?;
        }
        self.visit(catch.body)?;
        self.close(node);
        Ok(())
    }

    fn visit_variable_declaration(&mut self, node: NodeId, declaration: &VariableDeclaration) -> VisitResult {
        let ast = self.ast;
        let current = self.current_scope();
        let target_scope = if declaration.kind.is_var() {
            self.manager.scope(current).variable_scope
        } else {
            current
        };
        let kind = declaration.kind;

        for (index, &declarator_id) in declaration.declarations.iter().enumerate() {
            let NodeKind::VariableDeclarator(declarator) = ast.kind(declarator_id) else {
                continue;
            };
            let init = declarator.init;
            self.visit_pattern(declarator.id, true, |this, target| {
                let def = Definition::variable(target.identifier, declarator_id, node, index, kind);
                this.manager.define(this.ast, target_scope, target.identifier, def);
                this.referencing_default_value(target, None, true);
                if init.is_some() {
                    this.referencing(target.identifier, ReferenceFlags::WRITE, init, None, !target.top_level, true);
                }
            })?;
            if let Some(init) = init {
                self.visit(init)?;
            }
        }
        Ok(())
    }

    fn visit_function(&mut self, node: NodeId) -> VisitResult {
        let ast = self.ast;
        let kind = ast.kind(node);
        match kind {
            NodeKind::FunctionDeclaration(function) => {
                if let Some(id) = function.id {
                    let scope = self.current_scope();
                    self.manager
                        .define(ast, scope, id, Definition::new(DefinitionKind::FunctionName, id, node));
                }
            }
            NodeKind::FunctionExpression(function) if function.id.is_some() => {
                self.nest(ScopeKind::FunctionExpressionName, node);
            }
            _ => {}
        }
        self.nest_method(ScopeKind::Function, node, self.inner_method_definition);

        for (index, &param) in kind.function_params().unwrap_or(&[]).iter().enumerate() {
            self.visit_pattern(param, true, |this, target| {
                let scope = this.current_scope();
                let def = Definition::parameter(target.identifier, node, index, target.rest);
                this.manager.define(this.ast, scope, target.identifier, def);
                this.referencing_default_value(target, None, true);
            })?;
        }

        if let Some(body) = kind.function_body() {
            match ast.kind(body) {
                NodeKind::BlockStatement(_) => self.visit_children(body)?,
                _ => self.visit(body)?,
            }
        }
        self.close(node);
        Ok(())
    }

    fn visit_class(&mut self, node: NodeId, class: &Class) -> VisitResult {
        let ast = self.ast;
        if let (NodeKind::ClassDeclaration(_), Some(id)) = (ast.kind(node), class.id) {
            let scope = self.current_scope();
            self.manager
                .define(ast, scope, id, Definition::new(DefinitionKind::ClassName, id, node));
        }
        let scope = self.nest(ScopeKind::Class, node);
        if let Some(id) = class.id {
            self.manager
                .define(ast, scope, id, Definition::new(DefinitionKind::ClassName, id, node));
        }
        if let Some(super_class) = class.super_class {
            self.visit(super_class)?;
        }
        self.visit(class.body)?;
        self.close(node);
        Ok(())
    }

    fn visit_import(&mut self, node: NodeId, import: &ImportDeclaration) -> VisitResult {
        if !self.is_module {
            return Err(ScopeError::ImportOutsideModule(node));
        }
        let ast = self.ast;
        let scope = self.current_scope();
        let type_only_declaration = import.import_kind == ImportKind::Type;
        for &specifier in &import.specifiers {
            let (local, type_only) = match ast.kind(specifier) {
                NodeKind::ImportSpecifier(named) => {
                    (named.local, type_only_declaration || named.import_kind == ImportKind::Type)
                }
                NodeKind::ImportDefaultSpecifier(local) | NodeKind::ImportNamespaceSpecifier(local) => {
                    (local.local, type_only_declaration)
                }
                _ => continue,
            };
            let mut def = Definition::new(DefinitionKind::ImportBinding, local, specifier).with_parent(node);
            def.type_only = type_only;
            self.manager.define(ast, scope, local, def);
        }
        Ok(())
    }
}
