//! Lexical scopes.

use crate::reference::ReferenceId;
use crate::variable::VariableId;
use scopekit_ast::NodeId;
use scopekit_core::{InternedString, OrderedMap};
use std::fmt;

/// Index of a scope in `ScopeManager::scopes`. Scope 0 is the global scope.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Block,
    Catch,
    Class,
    ClassFieldInitializer,
    ClassStaticBlock,
    For,
    Function,
    FunctionExpressionName,
    Global,
    Module,
    Switch,
    With,
}

impl ScopeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Block => "block",
            ScopeKind::Catch => "catch",
            ScopeKind::Class => "class",
            ScopeKind::ClassFieldInitializer => "class-field-initializer",
            ScopeKind::ClassStaticBlock => "class-static-block",
            ScopeKind::For => "for",
            ScopeKind::Function => "function",
            ScopeKind::FunctionExpressionName => "function-expression-name",
            ScopeKind::Global => "global",
            ScopeKind::Module => "module",
            ScopeKind::Switch => "switch",
            ScopeKind::With => "with",
        }
    }

    /// Scopes that own `var` declarations made in their descendants.
    pub fn is_variable_scope(self) -> bool {
        matches!(
            self,
            ScopeKind::Global
                | ScopeKind::Module
                | ScopeKind::Function
                | ScopeKind::ClassFieldInitializer
                | ScopeKind::ClassStaticBlock
        )
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variables created by assignments to undeclared names in sloppy code,
/// kept apart from the global table.
#[derive(Debug, Clone, Default)]
pub struct ImplicitGlobals {
    pub set: OrderedMap<InternedString, VariableId>,
    /// References still unresolved when the global scope closed.
    pub left: Vec<ReferenceId>,
}

impl ImplicitGlobals {
    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.set.values().copied()
    }
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub is_strict: bool,
    pub upper: Option<ScopeId>,
    pub child_scopes: Vec<ScopeId>,
    /// The nearest enclosing scope (possibly this one) that holds `var`s.
    pub variable_scope: ScopeId,
    /// The node this scope is anchored at.
    pub block: NodeId,
    /// Declared variables by name, in declaration order.
    pub set: OrderedMap<InternedString, VariableId>,
    /// References created directly in this scope.
    pub references: Vec<ReferenceId>,
    /// References this scope could not resolve.
    pub through: Vec<ReferenceId>,
    /// Only the global and `with` scopes resolve dynamically.
    pub dynamic: bool,
    /// Set on `function-expression-name` scopes.
    pub function_expression_scope: bool,
    /// Whether `this` occurs directly in this variable scope.
    pub this_found: bool,
    /// Present on the global scope only.
    pub implicit: Option<ImplicitGlobals>,
    /// References waiting to be resolved when the scope closes.
    pub(crate) left: Vec<ReferenceId>,
}

impl Scope {
    pub(crate) fn new(
        id: ScopeId,
        kind: ScopeKind,
        upper: Option<ScopeId>,
        variable_scope: ScopeId,
        block: NodeId,
        is_strict: bool,
    ) -> Self {
        Self {
            id,
            kind,
            is_strict,
            upper,
            child_scopes: Vec::new(),
            variable_scope,
            block,
            set: OrderedMap::new(),
            references: Vec::new(),
            through: Vec::new(),
            dynamic: matches!(kind, ScopeKind::Global | ScopeKind::With),
            function_expression_scope: kind == ScopeKind::FunctionExpressionName,
            this_found: false,
            implicit: (kind == ScopeKind::Global).then(ImplicitGlobals::default),
            left: Vec::new(),
        }
    }

    /// Declared variables, in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.set.values().copied()
    }

    pub fn variable(&self, name: InternedString) -> Option<VariableId> {
        self.set.get(&name).copied()
    }

    pub fn is_global(&self) -> bool {
        self.kind == ScopeKind::Global
    }
}
