//! Per-kind helpers: ESTree type names, kind checks and casts.

use crate::node::*;
use crate::types::NodeId;
use scopekit_core::intern::InternedString;

impl NodeKind {
    /// The ESTree `type` string of this node.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Program(_) => "Program",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::PrivateIdentifier(_) => "PrivateIdentifier",
            NodeKind::Literal(_) => "Literal",
            NodeKind::TemplateLiteral(_) => "TemplateLiteral",
            NodeKind::TemplateElement(_) => "TemplateElement",
            NodeKind::ThisExpression => "ThisExpression",
            NodeKind::Super => "Super",
            NodeKind::ArrayExpression(_) => "ArrayExpression",
            NodeKind::ObjectExpression(_) => "ObjectExpression",
            NodeKind::Property(_) => "Property",
            NodeKind::FunctionExpression(_) => "FunctionExpression",
            NodeKind::ArrowFunctionExpression(_) => "ArrowFunctionExpression",
            NodeKind::ClassExpression(_) => "ClassExpression",
            NodeKind::UnaryExpression(_) => "UnaryExpression",
            NodeKind::UpdateExpression(_) => "UpdateExpression",
            NodeKind::BinaryExpression(_) => "BinaryExpression",
            NodeKind::LogicalExpression(_) => "LogicalExpression",
            NodeKind::AssignmentExpression(_) => "AssignmentExpression",
            NodeKind::ConditionalExpression(_) => "ConditionalExpression",
            NodeKind::CallExpression(_) => "CallExpression",
            NodeKind::NewExpression(_) => "NewExpression",
            NodeKind::MemberExpression(_) => "MemberExpression",
            NodeKind::ChainExpression(_) => "ChainExpression",
            NodeKind::SequenceExpression(_) => "SequenceExpression",
            NodeKind::YieldExpression(_) => "YieldExpression",
            NodeKind::AwaitExpression(_) => "AwaitExpression",
            NodeKind::TaggedTemplateExpression(_) => "TaggedTemplateExpression",
            NodeKind::MetaProperty(_) => "MetaProperty",
            NodeKind::SpreadElement(_) => "SpreadElement",
            NodeKind::ImportExpression(_) => "ImportExpression",
            NodeKind::ObjectPattern(_) => "ObjectPattern",
            NodeKind::ArrayPattern(_) => "ArrayPattern",
            NodeKind::RestElement(_) => "RestElement",
            NodeKind::AssignmentPattern(_) => "AssignmentPattern",
            NodeKind::ExpressionStatement(_) => "ExpressionStatement",
            NodeKind::BlockStatement(_) => "BlockStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::DebuggerStatement => "DebuggerStatement",
            NodeKind::WithStatement(_) => "WithStatement",
            NodeKind::ReturnStatement(_) => "ReturnStatement",
            NodeKind::LabeledStatement(_) => "LabeledStatement",
            NodeKind::BreakStatement(_) => "BreakStatement",
            NodeKind::ContinueStatement(_) => "ContinueStatement",
            NodeKind::IfStatement(_) => "IfStatement",
            NodeKind::SwitchStatement(_) => "SwitchStatement",
            NodeKind::SwitchCase(_) => "SwitchCase",
            NodeKind::ThrowStatement(_) => "ThrowStatement",
            NodeKind::TryStatement(_) => "TryStatement",
            NodeKind::CatchClause(_) => "CatchClause",
            NodeKind::WhileStatement(_) => "WhileStatement",
            NodeKind::DoWhileStatement(_) => "DoWhileStatement",
            NodeKind::ForStatement(_) => "ForStatement",
            NodeKind::ForInStatement(_) => "ForInStatement",
            NodeKind::ForOfStatement(_) => "ForOfStatement",
            NodeKind::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeKind::VariableDeclaration(_) => "VariableDeclaration",
            NodeKind::VariableDeclarator(_) => "VariableDeclarator",
            NodeKind::ClassDeclaration(_) => "ClassDeclaration",
            NodeKind::ClassBody(_) => "ClassBody",
            NodeKind::MethodDefinition(_) => "MethodDefinition",
            NodeKind::PropertyDefinition(_) => "PropertyDefinition",
            NodeKind::StaticBlock(_) => "StaticBlock",
            NodeKind::ImportDeclaration(_) => "ImportDeclaration",
            NodeKind::ImportSpecifier(_) => "ImportSpecifier",
            NodeKind::ImportDefaultSpecifier(_) => "ImportDefaultSpecifier",
            NodeKind::ImportNamespaceSpecifier(_) => "ImportNamespaceSpecifier",
            NodeKind::ExportNamedDeclaration(_) => "ExportNamedDeclaration",
            NodeKind::ExportSpecifier(_) => "ExportSpecifier",
            NodeKind::ExportDefaultDeclaration(_) => "ExportDefaultDeclaration",
            NodeKind::ExportAllDeclaration(_) => "ExportAllDeclaration",
        }
    }

    pub fn is_program(&self) -> bool {
        matches!(self, NodeKind::Program(_))
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, NodeKind::Identifier(_))
    }

    /// The name of an `Identifier` node (private names excluded).
    pub fn identifier_name(&self) -> Option<InternedString> {
        match self {
            NodeKind::Identifier(id) => Some(id.name),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration(_)
                | NodeKind::FunctionExpression(_)
                | NodeKind::ArrowFunctionExpression(_)
        )
    }

    /// The parameter list of any function-like node.
    pub fn function_params(&self) -> Option<&[NodeId]> {
        match self {
            NodeKind::FunctionDeclaration(f) | NodeKind::FunctionExpression(f) => Some(&f.params),
            NodeKind::ArrowFunctionExpression(f) => Some(&f.params),
            _ => None,
        }
    }

    /// The body of any function-like node.
    pub fn function_body(&self) -> Option<NodeId> {
        match self {
            NodeKind::FunctionDeclaration(f) | NodeKind::FunctionExpression(f) => f.body,
            NodeKind::ArrowFunctionExpression(f) => Some(f.body),
            _ => None,
        }
    }

    /// Whether the node can appear as a binding or assignment target.
    pub fn is_pattern(&self) -> bool {
        matches!(
            self,
            NodeKind::Identifier(_)
                | NodeKind::ObjectPattern(_)
                | NodeKind::ArrayPattern(_)
                | NodeKind::SpreadElement(_)
                | NodeKind::RestElement(_)
                | NodeKind::AssignmentPattern(_)
        )
    }
}
