//! Generic child iteration.
//!
//! `for_each_child` yields the children of a node in ESTree visitor-key
//! order, which is also the order in which the scope analyzer visits nodes it
//! has no dedicated handling for.

use crate::node::*;
use crate::types::NodeId;

#[inline]
fn opt(f: &mut impl FnMut(NodeId), node: Option<NodeId>) {
    if let Some(node) = node {
        f(node);
    }
}

impl NodeKind {
    /// Call `f` for each direct child, in visitor-key order. Holes in array
    /// literals and array patterns are skipped.
    pub fn for_each_child(&self, mut f: impl FnMut(NodeId)) {
        match self {
            NodeKind::Program(n) => n.body.iter().copied().for_each(&mut f),

            NodeKind::Identifier(_)
            | NodeKind::PrivateIdentifier(_)
            | NodeKind::Literal(_)
            | NodeKind::TemplateElement(_)
            | NodeKind::ThisExpression
            | NodeKind::Super
            | NodeKind::EmptyStatement
            | NodeKind::DebuggerStatement => {}

            NodeKind::TemplateLiteral(n) => {
                n.quasis.iter().copied().for_each(&mut f);
                n.expressions.iter().copied().for_each(&mut f);
            }
            NodeKind::ArrayExpression(n) => n.elements.iter().flatten().copied().for_each(&mut f),
            NodeKind::ObjectExpression(n) => n.properties.iter().copied().for_each(&mut f),
            NodeKind::Property(n) => {
                f(n.key);
                f(n.value);
            }
            NodeKind::FunctionExpression(n) | NodeKind::FunctionDeclaration(n) => {
                opt(&mut f, n.id);
                n.params.iter().copied().for_each(&mut f);
                opt(&mut f, n.body);
            }
            NodeKind::ArrowFunctionExpression(n) => {
                n.params.iter().copied().for_each(&mut f);
                f(n.body);
            }
            NodeKind::ClassExpression(n) | NodeKind::ClassDeclaration(n) => {
                opt(&mut f, n.id);
                opt(&mut f, n.super_class);
                f(n.body);
            }
            NodeKind::UnaryExpression(n) => f(n.argument),
            NodeKind::UpdateExpression(n) => f(n.argument),
            NodeKind::BinaryExpression(n) => {
                f(n.left);
                f(n.right);
            }
            NodeKind::LogicalExpression(n) => {
                f(n.left);
                f(n.right);
            }
            NodeKind::AssignmentExpression(n) => {
                f(n.left);
                f(n.right);
            }
            NodeKind::ConditionalExpression(n) => {
                f(n.test);
                f(n.consequent);
                f(n.alternate);
            }
            NodeKind::CallExpression(n) => {
                f(n.callee);
                n.arguments.iter().copied().for_each(&mut f);
            }
            NodeKind::NewExpression(n) => {
                f(n.callee);
                n.arguments.iter().copied().for_each(&mut f);
            }
            NodeKind::MemberExpression(n) => {
                f(n.object);
                f(n.property);
            }
            NodeKind::ChainExpression(n) => f(n.expression),
            NodeKind::SequenceExpression(n) => n.expressions.iter().copied().for_each(&mut f),
            NodeKind::YieldExpression(n) => opt(&mut f, n.argument),
            NodeKind::AwaitExpression(n) => f(n.argument),
            NodeKind::TaggedTemplateExpression(n) => {
                f(n.tag);
                f(n.quasi);
            }
            NodeKind::MetaProperty(n) => {
                f(n.meta);
                f(n.property);
            }
            NodeKind::SpreadElement(n) => f(n.argument),
            NodeKind::ImportExpression(n) => {
                f(n.source);
                opt(&mut f, n.options);
            }

            NodeKind::ObjectPattern(n) => n.properties.iter().copied().for_each(&mut f),
            NodeKind::ArrayPattern(n) => n.elements.iter().flatten().copied().for_each(&mut f),
            NodeKind::RestElement(n) => f(n.argument),
            NodeKind::AssignmentPattern(n) => {
                f(n.left);
                f(n.right);
            }

            NodeKind::ExpressionStatement(n) => f(n.expression),
            NodeKind::BlockStatement(n) => n.body.iter().copied().for_each(&mut f),
            NodeKind::WithStatement(n) => {
                f(n.object);
                f(n.body);
            }
            NodeKind::ReturnStatement(n) => opt(&mut f, n.argument),
            NodeKind::LabeledStatement(n) => {
                f(n.label);
                f(n.body);
            }
            NodeKind::BreakStatement(n) | NodeKind::ContinueStatement(n) => opt(&mut f, n.label),
            NodeKind::IfStatement(n) => {
                f(n.test);
                f(n.consequent);
                opt(&mut f, n.alternate);
            }
            NodeKind::SwitchStatement(n) => {
                f(n.discriminant);
                n.cases.iter().copied().for_each(&mut f);
            }
            NodeKind::SwitchCase(n) => {
                opt(&mut f, n.test);
                n.consequent.iter().copied().for_each(&mut f);
            }
            NodeKind::ThrowStatement(n) => f(n.argument),
            NodeKind::TryStatement(n) => {
                f(n.block);
                opt(&mut f, n.handler);
                opt(&mut f, n.finalizer);
            }
            NodeKind::CatchClause(n) => {
                opt(&mut f, n.param);
                f(n.body);
            }
            NodeKind::WhileStatement(n) => {
                f(n.test);
                f(n.body);
            }
            NodeKind::DoWhileStatement(n) => {
                f(n.body);
                f(n.test);
            }
            NodeKind::ForStatement(n) => {
                opt(&mut f, n.init);
                opt(&mut f, n.test);
                opt(&mut f, n.update);
                f(n.body);
            }
            NodeKind::ForInStatement(n) => {
                f(n.left);
                f(n.right);
                f(n.body);
            }
            NodeKind::ForOfStatement(n) => {
                f(n.left);
                f(n.right);
                f(n.body);
            }

            NodeKind::VariableDeclaration(n) => n.declarations.iter().copied().for_each(&mut f),
            NodeKind::VariableDeclarator(n) => {
                f(n.id);
                opt(&mut f, n.init);
            }

            NodeKind::ClassBody(n) => n.body.iter().copied().for_each(&mut f),
            NodeKind::MethodDefinition(n) => {
                f(n.key);
                f(n.value);
            }
            NodeKind::PropertyDefinition(n) => {
                f(n.key);
                opt(&mut f, n.value);
            }
            NodeKind::StaticBlock(n) => n.body.iter().copied().for_each(&mut f),

            NodeKind::ImportDeclaration(n) => {
                n.specifiers.iter().copied().for_each(&mut f);
                f(n.source);
            }
            NodeKind::ImportSpecifier(n) => {
                f(n.imported);
                f(n.local);
            }
            NodeKind::ImportDefaultSpecifier(n) | NodeKind::ImportNamespaceSpecifier(n) => {
                f(n.local)
            }
            NodeKind::ExportNamedDeclaration(n) => {
                opt(&mut f, n.declaration);
                n.specifiers.iter().copied().for_each(&mut f);
                opt(&mut f, n.source);
            }
            NodeKind::ExportSpecifier(n) => {
                f(n.exported);
                f(n.local);
            }
            NodeKind::ExportDefaultDeclaration(n) => f(n.declaration),
            NodeKind::ExportAllDeclaration(n) => {
                opt(&mut f, n.exported);
                f(n.source);
            }
        }
    }

    /// The direct children, collected.
    pub fn children(&self) -> Vec<NodeId> {
        let mut children = Vec::new();
        self.for_each_child(|child| children.push(child));
        children
    }
}
