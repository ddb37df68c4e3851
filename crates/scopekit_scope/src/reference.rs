//! Identifier references.

use crate::scope::ScopeId;
use crate::variable::VariableId;
use scopekit_ast::NodeId;
use scopekit_core::InternedString;

/// Index of a reference in `ScopeManager::references`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ReferenceId(pub u32);

impl ReferenceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// How a reference uses its variable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ReferenceFlags: u8 {
        const READ  = 1 << 0;
        const WRITE = 1 << 1;
        const RW    = Self::READ.bits() | Self::WRITE.bits();
    }
}

/// Where an assignment to a possibly undeclared name happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImplicitGlobalSite {
    /// The assigned identifier.
    pub pattern: NodeId,
    /// The assignment expression or `for-in`/`for-of` statement.
    pub node: NodeId,
}

#[derive(Debug, Clone)]
pub struct Reference {
    pub id: ReferenceId,
    pub identifier: NodeId,
    pub name: InternedString,
    /// The scope the reference occurs in.
    pub from: ScopeId,
    pub resolved: Option<VariableId>,
    pub flags: ReferenceFlags,
    /// The assigned expression, for writes.
    pub write_expr: Option<NodeId>,
    /// The write targets part of a destructuring pattern.
    pub partial: bool,
    /// The write is a declaration initializer.
    pub init: bool,
    /// Occurs inside a `with` body.
    pub tainted: bool,
    pub maybe_implicit_global: Option<ImplicitGlobalSite>,
}

impl Reference {
    pub fn is_read(&self) -> bool {
        self.flags.contains(ReferenceFlags::READ)
    }

    pub fn is_write(&self) -> bool {
        self.flags.contains(ReferenceFlags::WRITE)
    }

    pub fn is_read_only(&self) -> bool {
        self.flags == ReferenceFlags::READ
    }

    pub fn is_write_only(&self) -> bool {
        self.flags == ReferenceFlags::WRITE
    }

    pub fn is_read_write(&self) -> bool {
        self.flags == ReferenceFlags::RW
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}
