//! The node arena for one source file.

use crate::node::{Node, NodeKind};
use crate::types::{CommentId, CommentKind, NodeId};
use scopekit_core::intern::{InternedString, StringInterner};
use scopekit_core::text::Span;

/// A source comment. `value` excludes the `//` or `/* */` delimiters.
#[derive(Debug, Clone)]
pub struct Comment {
    pub kind: CommentKind,
    pub value: String,
    pub span: Span,
}

impl Comment {
    pub fn is_block(&self) -> bool {
        self.kind == CommentKind::Block
    }
}

/// A parsed file: nodes with parent links, the root `Program`, the comment
/// list, and the interner that owns every identifier name.
#[derive(Debug, Clone)]
pub struct Ast {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) comments: Vec<Comment>,
    pub(crate) interner: StringInterner,
}

impl Ast {
    /// The root `Program` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Whether `id` addresses a node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// The node for `id`.
    ///
    /// Panics when `id` does not belong to this tree; use [`Ast::get`] for
    /// ids from untrusted callers.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.node(id).span
    }

    /// Iterate from `id`'s parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            ast: self,
            next: self.parent(id),
        }
    }

    /// The name of an `Identifier` node.
    pub fn identifier_name(&self, id: NodeId) -> Option<InternedString> {
        self.get(id).and_then(|node| node.kind.identifier_name())
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.get(id.index())
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn resolve(&self, name: InternedString) -> &str {
        self.interner.resolve(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Iterator over the ancestors of a node, innermost first.
pub struct Ancestors<'a> {
    ast: &'a Ast,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.ast.parent(current);
        Some(current)
    }
}
