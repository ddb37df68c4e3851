//! Tree construction.
//!
//! `AstBuilder` allocates nodes bottom-up (children before parents) and links
//! parents in `finish`. The convenience constructors build ESTree-shaped
//! nodes the way a parser would, so parser adapters and tests share one
//! construction path.

use crate::ast::{Ast, Comment};
use crate::node::*;
use crate::types::*;
use scopekit_core::intern::{InternedString, StringInterner};
use scopekit_core::text::Span;

#[derive(Debug, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
    comments: Vec<Comment>,
    interner: StringInterner,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build into an existing interner, e.g. one shared with the parser.
    pub fn with_interner(interner: StringInterner) -> Self {
        Self {
            nodes: Vec::new(),
            comments: Vec::new(),
            interner,
        }
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn intern(&self, name: &str) -> InternedString {
        self.interner.intern(name)
    }

    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.alloc_at(kind, Span::default())
    }

    pub fn alloc_at(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind, span));
        id
    }

    /// Set the span of an already allocated node.
    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.nodes[id.index()].span = span;
    }

    pub fn comment(&mut self, kind: CommentKind, value: &str, span: Span) -> CommentId {
        let id = CommentId(self.comments.len() as u32);
        self.comments.push(Comment {
            kind,
            value: value.to_string(),
            span,
        });
        id
    }

    /// A `/* value */` comment.
    pub fn block_comment(&mut self, value: &str) -> CommentId {
        self.comment(CommentKind::Block, value, Span::default())
    }

    /// A `// value` comment.
    pub fn line_comment(&mut self, value: &str) -> CommentId {
        self.comment(CommentKind::Line, value, Span::default())
    }

    /// Link parents and seal the tree with `root` as its program node.
    pub fn finish(mut self, root: NodeId) -> Ast {
        debug_assert!(root.index() < self.nodes.len(), "root {root} was never allocated");
        for index in 0..self.nodes.len() {
            let parent = NodeId(index as u32);
            for child in self.nodes[index].kind.children() {
                debug_assert!(child.index() < self.nodes.len(), "dangling child {child}");
                self.nodes[child.index()].parent = Some(parent);
            }
        }
        self.nodes[root.index()].parent = None;
        Ast {
            nodes: self.nodes,
            root,
            comments: self.comments,
            interner: self.interner,
        }
    }

    // ========================================================================
    // Names and literals
    // ========================================================================

    pub fn ident(&mut self, name: &str) -> NodeId {
        let name = self.intern(name);
        self.alloc(NodeKind::Identifier(Identifier { name }))
    }

    pub fn private_ident(&mut self, name: &str) -> NodeId {
        let name = self.intern(name);
        self.alloc(NodeKind::PrivateIdentifier(Identifier { name }))
    }

    /// A double-quoted string literal.
    pub fn string(&mut self, value: &str) -> NodeId {
        self.alloc(NodeKind::Literal(Literal {
            value: LiteralValue::String(value.to_string()),
            raw: Some(format!("\"{value}\"")),
        }))
    }

    pub fn number(&mut self, value: f64) -> NodeId {
        self.alloc(NodeKind::Literal(Literal {
            value: LiteralValue::Number(value),
            raw: Some(value.to_string()),
        }))
    }

    pub fn boolean(&mut self, value: bool) -> NodeId {
        self.alloc(NodeKind::Literal(Literal {
            value: LiteralValue::Boolean(value),
            raw: Some(value.to_string()),
        }))
    }

    pub fn null(&mut self) -> NodeId {
        self.alloc(NodeKind::Literal(Literal {
            value: LiteralValue::Null,
            raw: Some("null".to_string()),
        }))
    }

    /// A template literal; `quasis` has one more entry than `expressions`.
    pub fn template(&mut self, quasis: &[&str], expressions: Vec<NodeId>) -> NodeId {
        debug_assert_eq!(quasis.len(), expressions.len() + 1);
        let last = quasis.len().saturating_sub(1);
        let quasis = quasis
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                self.alloc(NodeKind::TemplateElement(TemplateElement {
                    raw: raw.to_string(),
                    cooked: Some(raw.to_string()),
                    tail: i == last,
                }))
            })
            .collect();
        self.alloc(NodeKind::TemplateLiteral(TemplateLiteral {
            quasis,
            expressions,
        }))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn this(&mut self) -> NodeId {
        self.alloc(NodeKind::ThisExpression)
    }

    pub fn super_(&mut self) -> NodeId {
        self.alloc(NodeKind::Super)
    }

    pub fn array(&mut self, elements: Vec<Option<NodeId>>) -> NodeId {
        self.alloc(NodeKind::ArrayExpression(ArrayExpression { elements }))
    }

    pub fn object(&mut self, properties: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::ObjectExpression(ObjectExpression { properties }))
    }

    /// `key: value` with a plain identifier key.
    pub fn property(&mut self, key: &str, value: NodeId) -> NodeId {
        let key = self.ident(key);
        self.alloc(NodeKind::Property(Property {
            key,
            value,
            kind: PropertyKind::Init,
            computed: false,
            shorthand: false,
            method: false,
        }))
    }

    /// `[key]: value`.
    pub fn computed_property(&mut self, key: NodeId, value: NodeId) -> NodeId {
        self.alloc(NodeKind::Property(Property {
            key,
            value,
            kind: PropertyKind::Init,
            computed: true,
            shorthand: false,
            method: false,
        }))
    }

    /// `{ name }` in an object literal or object pattern.
    pub fn shorthand_property(&mut self, name: &str) -> NodeId {
        let key = self.ident(name);
        let value = self.ident(name);
        self.alloc(NodeKind::Property(Property {
            key,
            value,
            kind: PropertyKind::Init,
            computed: false,
            shorthand: true,
            method: false,
        }))
    }

    /// `{ name = default }` in an object pattern.
    pub fn shorthand_default(&mut self, name: &str, default: NodeId) -> NodeId {
        let key = self.ident(name);
        let target = self.ident(name);
        let value = self.assign_pattern(target, default);
        self.alloc(NodeKind::Property(Property {
            key,
            value,
            kind: PropertyKind::Init,
            computed: false,
            shorthand: true,
            method: false,
        }))
    }

    /// `name() { ... }` in an object literal.
    pub fn method_property(&mut self, key: &str, value: NodeId) -> NodeId {
        let key = self.ident(key);
        self.alloc(NodeKind::Property(Property {
            key,
            value,
            kind: PropertyKind::Init,
            computed: false,
            shorthand: false,
            method: true,
        }))
    }

    pub fn function_expr(&mut self, id: Option<&str>, params: Vec<NodeId>, body: Vec<NodeId>) -> NodeId {
        let id = id.map(|name| self.ident(name));
        let body = self.block(body);
        self.alloc(NodeKind::FunctionExpression(Function {
            id,
            params,
            body: Some(body),
            is_async: false,
            generator: false,
        }))
    }

    /// `(params) => expression`.
    pub fn arrow(&mut self, params: Vec<NodeId>, body: NodeId) -> NodeId {
        self.alloc(NodeKind::ArrowFunctionExpression(ArrowFunction {
            params,
            body,
            expression: true,
            is_async: false,
        }))
    }

    /// `(params) => { body }`.
    pub fn arrow_block(&mut self, params: Vec<NodeId>, body: Vec<NodeId>) -> NodeId {
        let body = self.block(body);
        self.alloc(NodeKind::ArrowFunctionExpression(ArrowFunction {
            params,
            body,
            expression: false,
            is_async: false,
        }))
    }

    pub fn class_expr(&mut self, id: Option<&str>, super_class: Option<NodeId>, members: Vec<NodeId>) -> NodeId {
        let class = self.class(id, super_class, members);
        self.alloc(NodeKind::ClassExpression(class))
    }

    pub fn unary(&mut self, operator: UnaryOperator, argument: NodeId) -> NodeId {
        self.alloc(NodeKind::UnaryExpression(UnaryExpression { operator, argument }))
    }

    pub fn update(&mut self, operator: UpdateOperator, prefix: bool, argument: NodeId) -> NodeId {
        self.alloc(NodeKind::UpdateExpression(UpdateExpression {
            operator,
            prefix,
            argument,
        }))
    }

    pub fn binary(&mut self, operator: BinaryOperator, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(NodeKind::BinaryExpression(BinaryExpression {
            operator,
            left,
            right,
        }))
    }

    pub fn logical(&mut self, operator: LogicalOperator, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(NodeKind::LogicalExpression(LogicalExpression {
            operator,
            left,
            right,
        }))
    }

    /// `left = right`.
    pub fn assign(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.assign_op(AssignmentOperator::Assign, left, right)
    }

    pub fn assign_op(&mut self, operator: AssignmentOperator, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(NodeKind::AssignmentExpression(AssignmentExpression {
            operator,
            left,
            right,
        }))
    }

    pub fn conditional(&mut self, test: NodeId, consequent: NodeId, alternate: NodeId) -> NodeId {
        self.alloc(NodeKind::ConditionalExpression(ConditionalExpression {
            test,
            consequent,
            alternate,
        }))
    }

    pub fn call(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::CallExpression(CallExpression {
            callee,
            arguments,
            optional: false,
        }))
    }

    pub fn new_expr(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::NewExpression(NewExpression { callee, arguments }))
    }

    /// `object.property`.
    pub fn member(&mut self, object: NodeId, property: &str) -> NodeId {
        let property = self.ident(property);
        self.alloc(NodeKind::MemberExpression(MemberExpression {
            object,
            property,
            computed: false,
            optional: false,
        }))
    }

    /// `object[property]`.
    pub fn computed_member(&mut self, object: NodeId, property: NodeId) -> NodeId {
        self.alloc(NodeKind::MemberExpression(MemberExpression {
            object,
            property,
            computed: true,
            optional: false,
        }))
    }

    pub fn chain(&mut self, expression: NodeId) -> NodeId {
        self.alloc(NodeKind::ChainExpression(ChainExpression { expression }))
    }

    pub fn sequence(&mut self, expressions: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::SequenceExpression(SequenceExpression { expressions }))
    }

    pub fn yield_expr(&mut self, argument: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::YieldExpression(YieldExpression {
            argument,
            delegate: false,
        }))
    }

    pub fn await_expr(&mut self, argument: NodeId) -> NodeId {
        self.alloc(NodeKind::AwaitExpression(AwaitExpression { argument }))
    }

    pub fn tagged_template(&mut self, tag: NodeId, quasi: NodeId) -> NodeId {
        self.alloc(NodeKind::TaggedTemplateExpression(TaggedTemplateExpression { tag, quasi }))
    }

    /// `meta.property`, e.g. `new.target`.
    pub fn meta_property(&mut self, meta: &str, property: &str) -> NodeId {
        let meta = self.ident(meta);
        let property = self.ident(property);
        self.alloc(NodeKind::MetaProperty(MetaProperty { meta, property }))
    }

    pub fn spread(&mut self, argument: NodeId) -> NodeId {
        self.alloc(NodeKind::SpreadElement(SpreadElement { argument }))
    }

    pub fn import_expr(&mut self, source: NodeId) -> NodeId {
        self.alloc(NodeKind::ImportExpression(ImportExpression {
            source,
            options: None,
        }))
    }

    // ========================================================================
    // Patterns
    // ========================================================================

    pub fn object_pattern(&mut self, properties: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::ObjectPattern(ObjectPattern { properties }))
    }

    pub fn array_pattern(&mut self, elements: Vec<Option<NodeId>>) -> NodeId {
        self.alloc(NodeKind::ArrayPattern(ArrayPattern { elements }))
    }

    pub fn rest(&mut self, argument: NodeId) -> NodeId {
        self.alloc(NodeKind::RestElement(RestElement { argument }))
    }

    pub fn assign_pattern(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(NodeKind::AssignmentPattern(AssignmentPattern { left, right }))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn expr_stmt(&mut self, expression: NodeId) -> NodeId {
        self.alloc(NodeKind::ExpressionStatement(ExpressionStatement {
            expression,
            directive: None,
        }))
    }

    /// A directive prologue entry such as `"use strict";`.
    pub fn directive(&mut self, value: &str) -> NodeId {
        let expression = self.string(value);
        self.alloc(NodeKind::ExpressionStatement(ExpressionStatement {
            expression,
            directive: Some(value.to_string()),
        }))
    }

    pub fn block(&mut self, body: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::BlockStatement(BlockStatement { body }))
    }

    pub fn empty(&mut self) -> NodeId {
        self.alloc(NodeKind::EmptyStatement)
    }

    pub fn with_stmt(&mut self, object: NodeId, body: NodeId) -> NodeId {
        self.alloc(NodeKind::WithStatement(WithStatement { object, body }))
    }

    pub fn return_stmt(&mut self, argument: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::ReturnStatement(ReturnStatement { argument }))
    }

    pub fn labeled(&mut self, label: &str, body: NodeId) -> NodeId {
        let label = self.ident(label);
        self.alloc(NodeKind::LabeledStatement(LabeledStatement { label, body }))
    }

    pub fn break_stmt(&mut self, label: Option<&str>) -> NodeId {
        let label = label.map(|name| self.ident(name));
        self.alloc(NodeKind::BreakStatement(JumpStatement { label }))
    }

    pub fn continue_stmt(&mut self, label: Option<&str>) -> NodeId {
        let label = label.map(|name| self.ident(name));
        self.alloc(NodeKind::ContinueStatement(JumpStatement { label }))
    }

    pub fn if_stmt(&mut self, test: NodeId, consequent: NodeId, alternate: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::IfStatement(IfStatement {
            test,
            consequent,
            alternate,
        }))
    }

    pub fn switch_stmt(&mut self, discriminant: NodeId, cases: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::SwitchStatement(SwitchStatement { discriminant, cases }))
    }

    pub fn switch_case(&mut self, test: Option<NodeId>, consequent: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::SwitchCase(SwitchCase { test, consequent }))
    }

    pub fn throw_stmt(&mut self, argument: NodeId) -> NodeId {
        self.alloc(NodeKind::ThrowStatement(ThrowStatement { argument }))
    }

    pub fn try_stmt(&mut self, block: NodeId, handler: Option<NodeId>, finalizer: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::TryStatement(TryStatement {
            block,
            handler,
            finalizer,
        }))
    }

    pub fn catch_clause(&mut self, param: Option<NodeId>, body: Vec<NodeId>) -> NodeId {
        let body = self.block(body);
        self.alloc(NodeKind::CatchClause(CatchClause { param, body }))
    }

    pub fn while_stmt(&mut self, test: NodeId, body: NodeId) -> NodeId {
        self.alloc(NodeKind::WhileStatement(WhileStatement { test, body }))
    }

    pub fn do_while(&mut self, body: NodeId, test: NodeId) -> NodeId {
        self.alloc(NodeKind::DoWhileStatement(DoWhileStatement { body, test }))
    }

    pub fn for_stmt(
        &mut self,
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    ) -> NodeId {
        self.alloc(NodeKind::ForStatement(ForStatement {
            init,
            test,
            update,
            body,
        }))
    }

    pub fn for_in(&mut self, left: NodeId, right: NodeId, body: NodeId) -> NodeId {
        self.alloc(NodeKind::ForInStatement(ForInStatement { left, right, body }))
    }

    pub fn for_of(&mut self, left: NodeId, right: NodeId, body: NodeId) -> NodeId {
        self.alloc(NodeKind::ForOfStatement(ForOfStatement {
            left,
            right,
            body,
            is_await: false,
        }))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn var_decl(&mut self, kind: VariableKind, declarations: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::VariableDeclaration(VariableDeclaration { kind, declarations }))
    }

    pub fn declarator(&mut self, id: NodeId, init: Option<NodeId>) -> NodeId {
        self.alloc(NodeKind::VariableDeclarator(VariableDeclarator { id, init }))
    }

    /// `kind name = init;` with a single declarator.
    pub fn declare(&mut self, kind: VariableKind, name: &str, init: Option<NodeId>) -> NodeId {
        let id = self.ident(name);
        let declarator = self.declarator(id, init);
        self.var_decl(kind, vec![declarator])
    }

    /// `function name(params) { body }`; `None` for `export default function () {}`.
    pub fn function_decl(&mut self, name: Option<&str>, params: Vec<NodeId>, body: Vec<NodeId>) -> NodeId {
        let id = name.map(|name| self.ident(name));
        let body = self.block(body);
        self.alloc(NodeKind::FunctionDeclaration(Function {
            id,
            params,
            body: Some(body),
            is_async: false,
            generator: false,
        }))
    }

    pub fn class_decl(&mut self, id: Option<&str>, super_class: Option<NodeId>, members: Vec<NodeId>) -> NodeId {
        let class = self.class(id, super_class, members);
        self.alloc(NodeKind::ClassDeclaration(class))
    }

    fn class(&mut self, id: Option<&str>, super_class: Option<NodeId>, members: Vec<NodeId>) -> Class {
        let id = id.map(|name| self.ident(name));
        let body = self.alloc(NodeKind::ClassBody(ClassBody { body: members }));
        Class {
            id,
            super_class,
            body,
        }
    }

    // ========================================================================
    // Class members
    // ========================================================================

    /// A method; `value` must be a `FunctionExpression`.
    pub fn method(&mut self, kind: MethodKind, key: &str, value: NodeId, is_static: bool) -> NodeId {
        let key = self.ident(key);
        self.alloc(NodeKind::MethodDefinition(MethodDefinition {
            key,
            value,
            kind,
            computed: false,
            is_static,
        }))
    }

    pub fn property_def(&mut self, key: &str, value: Option<NodeId>, is_static: bool) -> NodeId {
        let key = self.ident(key);
        self.alloc(NodeKind::PropertyDefinition(PropertyDefinition {
            key,
            value,
            computed: false,
            is_static,
        }))
    }

    pub fn computed_property_def(&mut self, key: NodeId, value: Option<NodeId>, is_static: bool) -> NodeId {
        self.alloc(NodeKind::PropertyDefinition(PropertyDefinition {
            key,
            value,
            computed: true,
            is_static,
        }))
    }

    pub fn static_block(&mut self, body: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::StaticBlock(StaticBlock { body }))
    }

    // ========================================================================
    // Modules
    // ========================================================================

    pub fn import_decl(&mut self, specifiers: Vec<NodeId>, source: &str) -> NodeId {
        self.import_decl_kind(specifiers, source, ImportKind::Value)
    }

    /// `import type { ... } from "source"`.
    pub fn import_decl_kind(&mut self, specifiers: Vec<NodeId>, source: &str, import_kind: ImportKind) -> NodeId {
        let source = self.string(source);
        self.alloc(NodeKind::ImportDeclaration(ImportDeclaration {
            specifiers,
            source,
            import_kind,
        }))
    }

    /// `{ imported as local }`.
    pub fn import_specifier(&mut self, imported: &str, local: &str) -> NodeId {
        let imported = self.ident(imported);
        let local = self.ident(local);
        self.alloc(NodeKind::ImportSpecifier(ImportSpecifier {
            imported,
            local,
            import_kind: ImportKind::Value,
        }))
    }

    /// `{ type imported as local }`.
    pub fn import_type_specifier(&mut self, imported: &str, local: &str) -> NodeId {
        let imported = self.ident(imported);
        let local = self.ident(local);
        self.alloc(NodeKind::ImportSpecifier(ImportSpecifier {
            imported,
            local,
            import_kind: ImportKind::Type,
        }))
    }

    pub fn import_default(&mut self, local: &str) -> NodeId {
        let local = self.ident(local);
        self.alloc(NodeKind::ImportDefaultSpecifier(ImportLocalSpecifier { local }))
    }

    pub fn import_namespace(&mut self, local: &str) -> NodeId {
        let local = self.ident(local);
        self.alloc(NodeKind::ImportNamespaceSpecifier(ImportLocalSpecifier { local }))
    }

    pub fn export_named(&mut self, declaration: Option<NodeId>, specifiers: Vec<NodeId>, source: Option<&str>) -> NodeId {
        let source = source.map(|s| self.string(s));
        self.alloc(NodeKind::ExportNamedDeclaration(ExportNamedDeclaration {
            declaration,
            specifiers,
            source,
        }))
    }

    /// `{ local as exported }`.
    pub fn export_specifier(&mut self, local: &str, exported: &str) -> NodeId {
        let local = self.ident(local);
        let exported = self.ident(exported);
        self.alloc(NodeKind::ExportSpecifier(ExportSpecifier { local, exported }))
    }

    pub fn export_default(&mut self, declaration: NodeId) -> NodeId {
        self.alloc(NodeKind::ExportDefaultDeclaration(ExportDefaultDeclaration { declaration }))
    }

    pub fn export_all(&mut self, exported: Option<&str>, source: &str) -> NodeId {
        let exported = exported.map(|name| self.ident(name));
        let source = self.string(source);
        self.alloc(NodeKind::ExportAllDeclaration(ExportAllDeclaration { exported, source }))
    }

    // ========================================================================
    // Program
    // ========================================================================

    pub fn program(&mut self, source_type: SourceType, body: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::Program(Program { body, source_type }))
    }
}
