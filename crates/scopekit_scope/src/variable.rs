//! Variables and their definitions.

use crate::reference::ReferenceId;
use crate::scope::ScopeId;
use scopekit_ast::{CommentId, NodeId, VariableKind};
use scopekit_core::InternedString;
use scopekit_options::GlobalValue;

/// Index of a variable in `ScopeManager::variables`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct VariableId(pub u32);

impl VariableId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    CatchClause,
    ClassName,
    FunctionName,
    ImplicitGlobalVariable,
    ImportBinding,
    Parameter,
    Variable,
}

impl DefinitionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DefinitionKind::CatchClause => "CatchClause",
            DefinitionKind::ClassName => "ClassName",
            DefinitionKind::FunctionName => "FunctionName",
            DefinitionKind::ImplicitGlobalVariable => "ImplicitGlobalVariable",
            DefinitionKind::ImportBinding => "ImportBinding",
            DefinitionKind::Parameter => "Parameter",
            DefinitionKind::Variable => "Variable",
        }
    }
}

/// One declaration site of a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub kind: DefinitionKind,
    /// The identifier that introduces the name.
    pub name: NodeId,
    /// The declaring node: declarator, function, class, specifier, catch
    /// clause, or the assignment that created an implicit global.
    pub node: NodeId,
    /// The declaration statement for `Variable` and `ImportBinding`.
    pub parent: Option<NodeId>,
    /// Declarator index or parameter position.
    pub index: Option<usize>,
    /// Parameter declared with `...`.
    pub rest: bool,
    pub variable_kind: Option<VariableKind>,
    /// `import type` bindings.
    pub type_only: bool,
}

impl Definition {
    pub fn new(kind: DefinitionKind, name: NodeId, node: NodeId) -> Self {
        Self {
            kind,
            name,
            node,
            parent: None,
            index: None,
            rest: false,
            variable_kind: None,
            type_only: false,
        }
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn parameter(name: NodeId, function: NodeId, index: usize, rest: bool) -> Self {
        Self {
            rest,
            ..Self::new(DefinitionKind::Parameter, name, function).with_index(index)
        }
    }

    pub fn variable(name: NodeId, declarator: NodeId, declaration: NodeId, index: usize, kind: VariableKind) -> Self {
        Self {
            variable_kind: Some(kind),
            ..Self::new(DefinitionKind::Variable, name, declarator)
                .with_parent(declaration)
                .with_index(index)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub id: VariableId,
    pub name: InternedString,
    pub scope: ScopeId,
    /// Declaration-site identifiers, in order.
    pub identifiers: Vec<NodeId>,
    pub references: Vec<ReferenceId>,
    pub defs: Vec<Definition>,
    /// Referenced from inside a `with` body.
    pub tainted: bool,

    // Annotations written by the global finalizer.
    /// Set for configured globals only.
    pub writeable: Option<bool>,
    pub used: bool,
    pub exported: bool,
    /// Declared by a `/* global */` comment.
    pub explicit_global: bool,
    pub explicit_global_comments: Vec<CommentId>,
    /// The preset or configuration value that created this global.
    pub implicit_global_setting: Option<GlobalValue>,
}

impl Variable {
    pub fn new(id: VariableId, name: InternedString, scope: ScopeId) -> Self {
        Self {
            id,
            name,
            scope,
            identifiers: Vec::new(),
            references: Vec::new(),
            defs: Vec::new(),
            tainted: false,
            writeable: None,
            used: false,
            exported: false,
            explicit_global: false,
            explicit_global_comments: Vec::new(),
            implicit_global_setting: None,
        }
    }

    /// Declared in source, as opposed to configured or built in.
    pub fn is_declared(&self) -> bool {
        !self.defs.is_empty()
    }

    /// Usable in a type position.
    pub fn is_type_variable(&self) -> bool {
        self.defs.is_empty()
            || self
                .defs
                .iter()
                .any(|def| matches!(def.kind, DefinitionKind::ImportBinding | DefinitionKind::ClassName))
    }

    /// Usable in a value position.
    pub fn is_value_variable(&self) -> bool {
        self.defs.is_empty()
            || self
                .defs
                .iter()
                .any(|def| !(def.kind == DefinitionKind::ImportBinding && def.type_only))
    }
}
