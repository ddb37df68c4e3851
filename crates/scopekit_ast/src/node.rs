//! Node definitions.
//!
//! Every node kind mirrors an ESTree node type. Children are referenced by
//! `NodeId` into the owning `Ast` arena; optional children are `Option`s and
//! array holes (`[a, , b]`) are `None` entries.

use crate::types::*;
use scopekit_core::intern::InternedString;
use scopekit_core::text::Span;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    /// The syntactic parent; `None` for the root (and for detached nodes).
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            parent: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Program(Program),

    // -- Names and literals --
    Identifier(Identifier),
    PrivateIdentifier(Identifier),
    Literal(Literal),
    TemplateLiteral(TemplateLiteral),
    TemplateElement(TemplateElement),

    // -- Expressions --
    ThisExpression,
    Super,
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    Property(Property),
    FunctionExpression(Function),
    ArrowFunctionExpression(ArrowFunction),
    ClassExpression(Class),
    UnaryExpression(UnaryExpression),
    UpdateExpression(UpdateExpression),
    BinaryExpression(BinaryExpression),
    LogicalExpression(LogicalExpression),
    AssignmentExpression(AssignmentExpression),
    ConditionalExpression(ConditionalExpression),
    CallExpression(CallExpression),
    NewExpression(NewExpression),
    MemberExpression(MemberExpression),
    ChainExpression(ChainExpression),
    SequenceExpression(SequenceExpression),
    YieldExpression(YieldExpression),
    AwaitExpression(AwaitExpression),
    TaggedTemplateExpression(TaggedTemplateExpression),
    MetaProperty(MetaProperty),
    SpreadElement(SpreadElement),
    ImportExpression(ImportExpression),

    // -- Patterns --
    ObjectPattern(ObjectPattern),
    ArrayPattern(ArrayPattern),
    RestElement(RestElement),
    AssignmentPattern(AssignmentPattern),

    // -- Statements --
    ExpressionStatement(ExpressionStatement),
    BlockStatement(BlockStatement),
    EmptyStatement,
    DebuggerStatement,
    WithStatement(WithStatement),
    ReturnStatement(ReturnStatement),
    LabeledStatement(LabeledStatement),
    BreakStatement(JumpStatement),
    ContinueStatement(JumpStatement),
    IfStatement(IfStatement),
    SwitchStatement(SwitchStatement),
    SwitchCase(SwitchCase),
    ThrowStatement(ThrowStatement),
    TryStatement(TryStatement),
    CatchClause(CatchClause),
    WhileStatement(WhileStatement),
    DoWhileStatement(DoWhileStatement),
    ForStatement(ForStatement),
    ForInStatement(ForInStatement),
    ForOfStatement(ForOfStatement),

    // -- Declarations --
    FunctionDeclaration(Function),
    VariableDeclaration(VariableDeclaration),
    VariableDeclarator(VariableDeclarator),
    ClassDeclaration(Class),

    // -- Classes --
    ClassBody(ClassBody),
    MethodDefinition(MethodDefinition),
    PropertyDefinition(PropertyDefinition),
    StaticBlock(StaticBlock),

    // -- Modules --
    ImportDeclaration(ImportDeclaration),
    ImportSpecifier(ImportSpecifier),
    ImportDefaultSpecifier(ImportLocalSpecifier),
    ImportNamespaceSpecifier(ImportLocalSpecifier),
    ExportNamedDeclaration(ExportNamedDeclaration),
    ExportSpecifier(ExportSpecifier),
    ExportDefaultDeclaration(ExportDefaultDeclaration),
    ExportAllDeclaration(ExportAllDeclaration),
}

// ============================================================================
// Program
// ============================================================================

#[derive(Debug, Clone)]
pub struct Program {
    pub body: Vec<NodeId>,
    pub source_type: SourceType,
}

// ============================================================================
// Names and literals
// ============================================================================

#[derive(Debug, Clone)]
pub struct Identifier {
    pub name: InternedString,
}

#[derive(Debug, Clone)]
pub struct Literal {
    pub value: LiteralValue,
    /// The source text of the literal, including quotes, when known.
    pub raw: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TemplateLiteral {
    pub quasis: Vec<NodeId>,
    pub expressions: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct TemplateElement {
    pub raw: String,
    pub cooked: Option<String>,
    pub tail: bool,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone)]
pub struct ArrayExpression {
    pub elements: Vec<Option<NodeId>>,
}

#[derive(Debug, Clone)]
pub struct ObjectExpression {
    pub properties: Vec<NodeId>,
}

/// An object literal member or an object pattern member.
#[derive(Debug, Clone)]
pub struct Property {
    pub key: NodeId,
    pub value: NodeId,
    pub kind: PropertyKind,
    pub computed: bool,
    pub shorthand: bool,
    pub method: bool,
}

/// Shared shape of function declarations and function expressions.
#[derive(Debug, Clone)]
pub struct Function {
    pub id: Option<NodeId>,
    pub params: Vec<NodeId>,
    /// A `BlockStatement`; `None` only for bodiless declarations.
    pub body: Option<NodeId>,
    pub is_async: bool,
    pub generator: bool,
}

#[derive(Debug, Clone)]
pub struct ArrowFunction {
    pub params: Vec<NodeId>,
    /// A `BlockStatement`, or an expression when `expression` is set.
    pub body: NodeId,
    pub expression: bool,
    pub is_async: bool,
}

/// Shared shape of class declarations and class expressions.
#[derive(Debug, Clone)]
pub struct Class {
    pub id: Option<NodeId>,
    pub super_class: Option<NodeId>,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub argument: NodeId,
}

#[derive(Debug, Clone)]
pub struct UpdateExpression {
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: NodeId,
}

#[derive(Debug, Clone)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: NodeId,
    pub right: NodeId,
}

#[derive(Debug, Clone)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: NodeId,
    pub right: NodeId,
}

#[derive(Debug, Clone)]
pub struct AssignmentExpression {
    pub operator: AssignmentOperator,
    pub left: NodeId,
    pub right: NodeId,
}

#[derive(Debug, Clone)]
pub struct ConditionalExpression {
    pub test: NodeId,
    pub consequent: NodeId,
    pub alternate: NodeId,
}

#[derive(Debug, Clone)]
pub struct CallExpression {
    pub callee: NodeId,
    pub arguments: Vec<NodeId>,
    pub optional: bool,
}

#[derive(Debug, Clone)]
pub struct NewExpression {
    pub callee: NodeId,
    pub arguments: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct MemberExpression {
    pub object: NodeId,
    pub property: NodeId,
    pub computed: bool,
    pub optional: bool,
}

#[derive(Debug, Clone)]
pub struct ChainExpression {
    pub expression: NodeId,
}

#[derive(Debug, Clone)]
pub struct SequenceExpression {
    pub expressions: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct YieldExpression {
    pub argument: Option<NodeId>,
    pub delegate: bool,
}

#[derive(Debug, Clone)]
pub struct AwaitExpression {
    pub argument: NodeId,
}

#[derive(Debug, Clone)]
pub struct TaggedTemplateExpression {
    pub tag: NodeId,
    pub quasi: NodeId,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Clone)]
pub struct MetaProperty {
    pub meta: NodeId,
    pub property: NodeId,
}

#[derive(Debug, Clone)]
pub struct SpreadElement {
    pub argument: NodeId,
}

#[derive(Debug, Clone)]
pub struct ImportExpression {
    pub source: NodeId,
    pub options: Option<NodeId>,
}

// ============================================================================
// Patterns
// ============================================================================

#[derive(Debug, Clone)]
pub struct ObjectPattern {
    /// `Property` or `RestElement` nodes.
    pub properties: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct ArrayPattern {
    pub elements: Vec<Option<NodeId>>,
}

#[derive(Debug, Clone)]
pub struct RestElement {
    pub argument: NodeId,
}

#[derive(Debug, Clone)]
pub struct AssignmentPattern {
    pub left: NodeId,
    pub right: NodeId,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub struct ExpressionStatement {
    pub expression: NodeId,
    /// The directive text for directive-prologue statements such as
    /// `"use strict"`.
    pub directive: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BlockStatement {
    pub body: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct WithStatement {
    pub object: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct ReturnStatement {
    pub argument: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct LabeledStatement {
    pub label: NodeId,
    pub body: NodeId,
}

/// `break` and `continue`.
#[derive(Debug, Clone)]
pub struct JumpStatement {
    pub label: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct IfStatement {
    pub test: NodeId,
    pub consequent: NodeId,
    pub alternate: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct SwitchStatement {
    pub discriminant: NodeId,
    pub cases: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct SwitchCase {
    /// `None` for `default:`.
    pub test: Option<NodeId>,
    pub consequent: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct ThrowStatement {
    pub argument: NodeId,
}

#[derive(Debug, Clone)]
pub struct TryStatement {
    pub block: NodeId,
    pub handler: Option<NodeId>,
    pub finalizer: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct CatchClause {
    pub param: Option<NodeId>,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct WhileStatement {
    pub test: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct DoWhileStatement {
    pub body: NodeId,
    pub test: NodeId,
}

#[derive(Debug, Clone)]
pub struct ForStatement {
    pub init: Option<NodeId>,
    pub test: Option<NodeId>,
    pub update: Option<NodeId>,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct ForInStatement {
    pub left: NodeId,
    pub right: NodeId,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct ForOfStatement {
    pub left: NodeId,
    pub right: NodeId,
    pub body: NodeId,
    pub is_await: bool,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarations: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct VariableDeclarator {
    pub id: NodeId,
    pub init: Option<NodeId>,
}

// ============================================================================
// Classes
// ============================================================================

#[derive(Debug, Clone)]
pub struct ClassBody {
    pub body: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct MethodDefinition {
    pub key: NodeId,
    /// Always a `FunctionExpression`.
    pub value: NodeId,
    pub kind: MethodKind,
    pub computed: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    pub key: NodeId,
    pub value: Option<NodeId>,
    pub computed: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone)]
pub struct StaticBlock {
    pub body: Vec<NodeId>,
}

// ============================================================================
// Modules
// ============================================================================

#[derive(Debug, Clone)]
pub struct ImportDeclaration {
    pub specifiers: Vec<NodeId>,
    pub source: NodeId,
    pub import_kind: ImportKind,
}

#[derive(Debug, Clone)]
pub struct ImportSpecifier {
    pub imported: NodeId,
    pub local: NodeId,
    pub import_kind: ImportKind,
}

/// `import a from "m"` and `import * as a from "m"`.
#[derive(Debug, Clone)]
pub struct ImportLocalSpecifier {
    pub local: NodeId,
}

#[derive(Debug, Clone)]
pub struct ExportNamedDeclaration {
    pub declaration: Option<NodeId>,
    pub specifiers: Vec<NodeId>,
    pub source: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct ExportSpecifier {
    pub local: NodeId,
    pub exported: NodeId,
}

#[derive(Debug, Clone)]
pub struct ExportDefaultDeclaration {
    pub declaration: NodeId,
}

#[derive(Debug, Clone)]
pub struct ExportAllDeclaration {
    pub exported: Option<NodeId>,
    pub source: NodeId,
}
