//! scopekit_core: Core utilities shared by the scope analyzer.
//!
//! Provides string interning for identifier names, source spans, and the
//! ordered/multi maps that back scope tables.

pub mod collections;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use collections::{MultiMap, OrderedMap};
pub use intern::{InternedString, StringInterner};
pub use text::Span;
