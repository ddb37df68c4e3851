//! Binding-pattern traversal.
//!
//! Walks a declaration or assignment target and reports every bound
//! identifier, together with the default-value assignments enclosing it.
//! Expressions found inside the pattern (defaults, computed keys, member
//! targets) are collected separately so the referencer can visit them after
//! the bindings are in place.

use scopekit_ast::{Ast, NodeId, NodeKind};

/// One identifier bound by a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PatternTarget {
    pub identifier: NodeId,
    /// The pattern is the identifier itself.
    pub top_level: bool,
    /// Direct argument of a rest element.
    pub rest: bool,
    /// Enclosing `AssignmentPattern` / `AssignmentExpression` nodes,
    /// outermost first.
    pub assignments: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub(crate) struct PatternWalk {
    pub targets: Vec<PatternTarget>,
    pub right_hand_nodes: Vec<NodeId>,
}

pub(crate) fn walk_pattern(ast: &Ast, root: NodeId) -> PatternWalk {
    let mut visitor = PatternVisitor {
        ast,
        root,
        assignments: Vec::new(),
        rest_elements: Vec::new(),
        walk: PatternWalk::default(),
    };
    visitor.visit(root);
    visitor.walk
}

/// Whether `node` is a binding target that the pattern walk handles.
pub(crate) fn is_pattern(ast: &Ast, node: NodeId) -> bool {
    ast.kind(node).is_pattern()
}

/// The `(left, right)` of an assignment pattern or assignment expression.
pub(crate) fn assignment_parts(ast: &Ast, node: NodeId) -> Option<(NodeId, NodeId)> {
    match ast.kind(node) {
        NodeKind::AssignmentPattern(assignment) => Some((assignment.left, assignment.right)),
        NodeKind::AssignmentExpression(assignment) => Some((assignment.left, assignment.right)),
        _ => None,
    }
}

struct PatternVisitor<'a> {
    ast: &'a Ast,
    root: NodeId,
    assignments: Vec<NodeId>,
    rest_elements: Vec<NodeId>,
    walk: PatternWalk,
}

impl PatternVisitor<'_> {
    fn visit(&mut self, node: NodeId) {
        let ast = self.ast;
        match ast.kind(node) {
            NodeKind::Identifier(_) => {
                let rest = self
                    .rest_elements
                    .last()
                    .is_some_and(|&rest| matches!(ast.kind(rest), NodeKind::RestElement(r) if r.argument == node));
                self.walk.targets.push(PatternTarget {
                    identifier: node,
                    top_level: node == self.root,
                    rest,
                    assignments: self.assignments.clone(),
                });
            }
            NodeKind::Property(property) => {
                if property.computed {
                    self.walk.right_hand_nodes.push(property.key);
                }
                self.visit(property.value);
            }
            NodeKind::ArrayPattern(pattern) => {
                for element in pattern.elements.iter().flatten() {
                    self.visit(*element);
                }
            }
            NodeKind::ArrayExpression(array) => {
                for element in array.elements.iter().flatten() {
                    self.visit(*element);
                }
            }
            NodeKind::AssignmentPattern(_) | NodeKind::AssignmentExpression(_) => {
                if let Some((left, right)) = assignment_parts(ast, node) {
                    self.assignments.push(node);
                    self.visit(left);
                    self.walk.right_hand_nodes.push(right);
                    self.assignments.pop();
                }
            }
            NodeKind::RestElement(rest) => {
                self.rest_elements.push(node);
                self.visit(rest.argument);
                self.rest_elements.pop();
            }
            NodeKind::MemberExpression(member) => {
                if member.computed {
                    self.walk.right_hand_nodes.push(member.property);
                }
                self.walk.right_hand_nodes.push(member.object);
            }
            NodeKind::SpreadElement(spread) => self.visit(spread.argument),
            NodeKind::CallExpression(call) => {
                self.walk.right_hand_nodes.extend(call.arguments.iter().copied());
                self.visit(call.callee);
            }
            other => other.for_each_child(|child| self.visit(child)),
        }
    }
}
