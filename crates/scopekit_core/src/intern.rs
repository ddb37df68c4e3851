//! Name interning.
//!
//! Identifier names, directive names and configured global names of one
//! file share a single table, so scope lookups compare `u32` handles
//! instead of strings.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// Handle to a name stored in a [`StringInterner`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Name").field(&self.0).finish()
    }
}

/// Name table shared between a syntax tree and everything derived from it.
///
/// Clones point at the same table.
#[derive(Clone, Default)]
pub struct StringInterner {
    table: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, name: &str) -> InternedString {
        InternedString(self.table.get_or_intern(name))
    }

    pub fn intern_static(&self, name: &'static str) -> InternedString {
        InternedString(self.table.get_or_intern_static(name))
    }

    /// Handle for `name` if some node or configuration already used it.
    pub fn get(&self, name: &str) -> Option<InternedString> {
        self.table.get(name).map(InternedString)
    }

    pub fn resolve(&self, name: InternedString) -> &str {
        self.table.resolve(&name.0)
    }

    /// Wraps a handle for use in `{}` formatting, e.g. in log fields.
    pub fn display(&self, name: InternedString) -> impl fmt::Display + '_ {
        Resolved { name, table: self }
    }

    pub fn ptr_eq(&self, other: &StringInterner) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringInterner({} names)", self.len())
    }
}

struct Resolved<'a> {
    name: InternedString,
    table: &'a StringInterner,
}

impl fmt::Display for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table.resolve(self.name))
    }
}
