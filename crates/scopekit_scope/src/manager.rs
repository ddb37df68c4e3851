//! The scope manager: arenas for scopes, variables and references, the
//! node-to-scope index, and the primitives the referencer builds with.

use crate::reference::{Reference, ReferenceId};
use crate::scope::{Scope, ScopeId, ScopeKind};
use crate::variable::{Definition, DefinitionKind, Variable, VariableId};
use rustc_hash::FxHashMap;
use scopekit_ast::{Ast, LiteralValue, NodeId, NodeKind};
use scopekit_core::{InternedString, MultiMap, StringInterner};
use tracing::trace;

/// Which table of a scope a definition goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Declared,
    Implicit,
}

/// The result of analyzing one file.
#[derive(Debug, Clone)]
pub struct ScopeManager {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) variables: Vec<Variable>,
    pub(crate) references: Vec<Reference>,
    pub(crate) node_to_scope: FxHashMap<NodeId, Vec<ScopeId>>,
    pub(crate) declared_variables: MultiMap<NodeId, VariableId>,
    pub(crate) interner: StringInterner,
}

impl ScopeManager {
    pub(crate) fn new(interner: StringInterner) -> Self {
        Self {
            scopes: Vec::new(),
            variables: Vec::new(),
            references: Vec::new(),
            node_to_scope: FxHashMap::default(),
            declared_variables: MultiMap::new(),
            interner,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All scopes in creation order; the global scope comes first.
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// The scope for `id`.
    ///
    /// Panics when `id` comes from another manager; use
    /// [`ScopeManager::get_scope`] for ids from untrusted callers.
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn get_scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub fn global_scope(&self) -> &Scope {
        self.scope(ScopeId::GLOBAL)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Panics when `id` comes from another manager.
    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.index()]
    }

    pub fn get_variable(&self, id: VariableId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Panics when `id` comes from another manager.
    pub fn reference(&self, id: ReferenceId) -> &Reference {
        &self.references[id.index()]
    }

    pub fn get_reference(&self, id: ReferenceId) -> Option<&Reference> {
        self.references.get(id.index())
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// The text of a variable's name.
    pub fn name(&self, id: VariableId) -> &str {
        self.interner.resolve(self.variable(id).name)
    }

    /// Scopes anchored at `node`, outermost first.
    pub fn scopes_of(&self, node: NodeId) -> &[ScopeId] {
        self.node_to_scope.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Variables with a definition whose node or parent is `node`.
    pub fn get_declared_variables(&self, node: NodeId) -> &[VariableId] {
        self.declared_variables.get(&node).unwrap_or(&[])
    }

    /// The scope anchored at `node`: the outermost one, or the innermost
    /// when `inner` is set. A `function-expression-name` scope is never
    /// returned; its function scope is returned instead.
    pub fn acquire(&self, node: NodeId, inner: bool) -> Option<ScopeId> {
        let scopes = self.scopes_of(node);
        let found = if inner { scopes.last() } else { scopes.first() }.copied()?;
        let scope = self.scope(found);
        if scope.kind == ScopeKind::FunctionExpressionName {
            return scope.child_scopes.first().copied();
        }
        Some(found)
    }

    /// Look `name` up lexically, starting at `scope`.
    pub fn find_variable(&self, scope: ScopeId, name: &str) -> Option<VariableId> {
        let name = self.interner.get(name)?;
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(variable) = scope.variable(name) {
                return Some(variable);
            }
            current = scope.upper;
        }
        None
    }

    /// A variable of the global table by name.
    pub fn global_variable(&self, name: &str) -> Option<VariableId> {
        let name = self.interner.get(name)?;
        self.global_scope().variable(name)
    }

    /// Implicit globals created by sloppy-mode assignments, in creation order.
    pub fn implicit_globals(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.global_scope()
            .implicit
            .iter()
            .flat_map(|implicit| implicit.variables())
    }

    // ========================================================================
    // Construction
    // ========================================================================

    pub(crate) fn nest_scope(
        &mut self,
        ast: &Ast,
        kind: ScopeKind,
        upper: Option<ScopeId>,
        block: NodeId,
        is_method_definition: bool,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        let variable_scope = match upper {
            Some(upper) if !kind.is_variable_scope() => self.scope(upper).variable_scope,
            _ => id,
        };
        let upper_strict = upper.is_some_and(|upper| self.scope(upper).is_strict);
        let is_strict = upper_strict || is_strict_scope(ast, kind, block, is_method_definition);

        self.scopes.push(Scope::new(id, kind, upper, variable_scope, block, is_strict));
        if let Some(upper) = upper {
            self.scopes[upper.index()].child_scopes.push(id);
        }
        self.node_to_scope.entry(block).or_default().push(id);
        trace!(scope = %id, kind = %kind, block = %block, strict = is_strict, "nest scope");

        match (kind, ast.kind(block)) {
            (ScopeKind::Function, kind) if !matches!(kind, NodeKind::ArrowFunctionExpression(_)) => {
                let arguments = self.interner.intern_static("arguments");
                self.define_generic(id, Table::Declared, arguments, None, None);
            }
            (ScopeKind::FunctionExpressionName, NodeKind::FunctionExpression(function)) => {
                if let Some(name) = function.id {
                    self.define(ast, id, name, Definition::new(DefinitionKind::FunctionName, name, block));
                }
            }
            _ => {}
        }
        id
    }

    /// Define the identifier `name` in `scope`; non-identifiers are ignored.
    pub(crate) fn define(&mut self, ast: &Ast, scope: ScopeId, name: NodeId, def: Definition) {
        if let Some(text) = ast.identifier_name(name) {
            self.define_generic(scope, Table::Declared, text, Some(name), Some(def));
        }
    }

    pub(crate) fn define_generic(
        &mut self,
        scope: ScopeId,
        table: Table,
        name: InternedString,
        identifier: Option<NodeId>,
        def: Option<Definition>,
    ) -> VariableId {
        let existing = {
            let scope = self.scope(scope);
            match table {
                Table::Declared => scope.variable(name),
                Table::Implicit => scope
                    .implicit
                    .as_ref()
                    .and_then(|implicit| implicit.set.get(&name).copied()),
            }
        };
        let variable = match existing {
            Some(variable) => variable,
            None => {
                let variable = self.new_variable(scope, name);
                let scope = &mut self.scopes[scope.index()];
                match table {
                    Table::Declared => {
                        scope.set.insert(name, variable);
                    }
                    Table::Implicit => {
                        if let Some(implicit) = scope.implicit.as_mut() {
                            implicit.set.insert(name, variable);
                        }
                    }
                }
                variable
            }
        };

        if let Some(def) = def {
            self.declared_variables.insert_unique(def.node, variable);
            if let Some(parent) = def.parent {
                self.declared_variables.insert_unique(parent, variable);
            }
            self.variables[variable.index()].defs.push(def);
        }
        if let Some(identifier) = identifier {
            self.variables[variable.index()].identifiers.push(identifier);
        }
        variable
    }

    /// Allocate a variable without entering it into any table.
    pub(crate) fn new_variable(&mut self, scope: ScopeId, name: InternedString) -> VariableId {
        let id = VariableId(self.variables.len() as u32);
        self.variables.push(Variable::new(id, name, scope));
        id
    }

    /// Record a reference in `reference.from` and queue it for resolution.
    pub(crate) fn add_reference(&mut self, mut reference: Reference) -> ReferenceId {
        let id = ReferenceId(self.references.len() as u32);
        reference.id = id;
        let scope = &mut self.scopes[reference.from.index()];
        scope.references.push(id);
        scope.left.push(id);
        self.references.push(reference);
        id
    }

    /// Resolve the pending references of `scope` and return its parent.
    pub(crate) fn close_scope(&mut self, ast: &Ast, scope: ScopeId) -> Option<ScopeId> {
        let left = std::mem::take(&mut self.scopes[scope.index()].left);
        match self.scope(scope).kind {
            ScopeKind::Global => self.close_global(ast, scope, left),
            ScopeKind::With => {
                for reference in left {
                    self.references[reference.index()].tainted = true;
                    self.delegate_to_upper(scope, reference);
                }
            }
            _ => {
                for reference in left {
                    self.static_close(ast, scope, reference);
                }
            }
        }
        self.scope(scope).upper
    }

    fn close_global(&mut self, ast: &Ast, scope: ScopeId, left: Vec<ReferenceId>) {
        let sites: Vec<_> = left
            .iter()
            .filter_map(|&id| {
                let reference = self.reference(id);
                let site = reference.maybe_implicit_global?;
                (!self.scope(scope).set.contains_key(&reference.name)).then_some(site)
            })
            .collect();
        for site in sites {
            if let Some(name) = ast.identifier_name(site.pattern) {
                let def = Definition::new(DefinitionKind::ImplicitGlobalVariable, site.pattern, site.node);
                self.define_generic(scope, Table::Implicit, name, Some(site.pattern), Some(def));
            }
        }
        if let Some(implicit) = self.scopes[scope.index()].implicit.as_mut() {
            implicit.left = left.clone();
        }

        for reference in left {
            if self.resolves_statically_in_global(scope, reference) {
                self.static_close(ast, scope, reference);
            } else {
                trace!(reference = reference.0, "deferred to global through");
                self.scopes[scope.index()].through.push(reference);
            }
        }
    }

    /// Only `let`, `const` and class bindings resolve statically at the top
    /// level; everything else waits for the configured globals.
    fn resolves_statically_in_global(&self, scope: ScopeId, reference: ReferenceId) -> bool {
        let name = self.reference(reference).name;
        let Some(variable) = self.scope(scope).variable(name) else {
            return false;
        };
        let defs = &self.variable(variable).defs;
        !defs.is_empty()
            && defs.iter().all(|def| match def.kind {
                DefinitionKind::ClassName => true,
                DefinitionKind::Variable => def.variable_kind.is_some_and(|kind| !kind.is_var()),
                _ => false,
            })
    }

    fn static_close(&mut self, ast: &Ast, scope: ScopeId, reference: ReferenceId) {
        if !self.resolve(ast, scope, reference) {
            self.delegate_to_upper(scope, reference);
        }
    }

    fn resolve(&mut self, ast: &Ast, scope: ScopeId, reference: ReferenceId) -> bool {
        let name = self.reference(reference).name;
        let Some(variable) = self.scope(scope).variable(name) else {
            return false;
        };
        if !self.is_valid_resolution(ast, scope, reference, variable) {
            return false;
        }
        self.link(reference, variable);
        trace!(name = %self.interner.display(name), scope = %scope, "resolved reference");
        true
    }

    /// Bind `reference` to `variable` in both directions.
    pub(crate) fn link(&mut self, reference: ReferenceId, variable: VariableId) {
        let tainted = {
            let reference = &mut self.references[reference.index()];
            reference.resolved = Some(variable);
            reference.tainted
        };
        let variable = &mut self.variables[variable.index()];
        variable.references.push(reference);
        if tainted {
            variable.tainted = true;
        }
    }

    /// A reference in a parameter list never sees a variable declared only
    /// in the function body.
    fn is_valid_resolution(&self, ast: &Ast, scope: ScopeId, reference: ReferenceId, variable: VariableId) -> bool {
        let scope = self.scope(scope);
        if scope.kind != ScopeKind::Function {
            return true;
        }
        let Some(body) = ast.kind(scope.block).function_body() else {
            return true;
        };
        let in_body = |node: NodeId| node == body || ast.ancestors(node).any(|ancestor| ancestor == body);
        let reference = self.reference(reference);
        !(!in_body(reference.identifier) && self.variable(variable).defs.iter().all(|def| in_body(def.name)))
    }

    fn delegate_to_upper(&mut self, scope: ScopeId, reference: ReferenceId) {
        if let Some(upper) = self.scope(scope).upper {
            self.scopes[upper.index()].left.push(reference);
        }
        self.scopes[scope.index()].through.push(reference);
    }
}

/// Strictness a scope has on its own, ignoring its parent.
fn is_strict_scope(ast: &Ast, kind: ScopeKind, block: NodeId, is_method_definition: bool) -> bool {
    if is_method_definition {
        return true;
    }
    let body = match kind {
        ScopeKind::Class | ScopeKind::Module => return true,
        ScopeKind::Global => block,
        ScopeKind::Function => match ast.kind(block) {
            NodeKind::Program(_) => block,
            NodeKind::ArrowFunctionExpression(arrow) if arrow.expression => return false,
            other => match other.function_body() {
                Some(body) => body,
                None => return false,
            },
        },
        _ => return false,
    };
    has_use_strict_directive(ast, body)
}

/// Whether the directive prologue of a `Program` or function body block
/// contains `"use strict"`.
fn has_use_strict_directive(ast: &Ast, body: NodeId) -> bool {
    let statements = match ast.kind(body) {
        NodeKind::Program(program) => &program.body,
        NodeKind::BlockStatement(block) => &block.body,
        _ => return false,
    };
    for &statement in statements {
        let NodeKind::ExpressionStatement(statement) = ast.kind(statement) else {
            break;
        };
        let NodeKind::Literal(literal) = ast.kind(statement.expression) else {
            break;
        };
        let LiteralValue::String(value) = &literal.value else {
            break;
        };
        let is_use_strict = match &literal.raw {
            Some(raw) => raw == "\"use strict\"" || raw == "'use strict'",
            None => value == "use strict",
        };
        if is_use_strict {
            return true;
        }
    }
    false
}
