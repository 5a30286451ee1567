//! Typed syntax tree.
//!
//! The tree is a closed set of node kinds stored in the [`Program`](crate::Program)
//! arena. Children are referenced by [`NodeId`]; cross references into the
//! symbol graph are [`DeclId`], [`TagId`], [`FieldId`] and [`ComponentId`].
//!
//! Passes that rewrite children generically use [`NodeKind::children`] and
//! [`NodeKind::children_mut`], which list the same slots in the same order.

use smallvec::SmallVec;

use crate::{
    ComponentId, Constant, DeclId, FieldId, Location, Name, NodeId, TagId, TagKind, TypeId,
};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// Operators whose result is a truth value.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    // Expressions
    Literal(Constant),
    Identifier {
        name: Name,
        decl: DeclId,
    },
    /// `iface.function`
    InterfaceDeref {
        object: NodeId,
        name: Name,
        decl: DeclId,
    },
    FieldRef {
        object: NodeId,
        name: Name,
        field: FieldId,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Binary {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Conditional {
        cond: NodeId,
        then_expr: NodeId,
        else_expr: NodeId,
    },
    Cast {
        type_ref: NodeId,
        expr: NodeId,
    },
    Call {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    /// Brace initializer. Carries no type.
    InitList {
        elems: Vec<NodeId>,
    },

    // Types
    /// A written type; the node's `ty` is the type it denotes.
    TypeRef {
        elem: Option<NodeId>,
    },
    /// Use of a typedef name.
    TypeName {
        name: Name,
        decl: DeclId,
    },
    /// `struct S { ... }`, `union U`, `enum E { ... }`.
    TagRef {
        kind: TagKind,
        name: Option<Name>,
        tag: TagId,
        /// This reference is the tag's defining occurrence.
        defined: bool,
        /// `FieldDecl`s or `Enumerator`s.
        members: Vec<NodeId>,
    },
    FieldDecl {
        name: Option<Name>,
        type_ref: Option<NodeId>,
    },
    Enumerator {
        name: Name,
        decl: DeclId,
        value: Option<NodeId>,
    },

    // Declarations and statements
    /// One declarator of a `DataDecl`.
    VariableDecl {
        name: Name,
        decl: DeclId,
        init: Option<NodeId>,
    },
    /// A declaration statement: base type followed by declarators.
    DataDecl {
        type_ref: Option<NodeId>,
        decls: Vec<NodeId>,
    },
    FunctionDef {
        decl: DeclId,
        params: Vec<NodeId>,
        body: NodeId,
    },
    Compound {
        stmts: Vec<NodeId>,
    },
    ExprStmt(NodeId),
    Return(Option<NodeId>),

    // Components
    /// `components new M(args) as name` inside a configuration.
    ComponentRef {
        name: Name,
        component: ComponentId,
        args: Vec<NodeId>,
    },
    /// One side of a wiring statement, `a.b[args]`.
    EndpointRef {
        path: Vec<Name>,
        args: Vec<NodeId>,
    },
    Connection {
        from: NodeId,
        to: NodeId,
    },
    /// Module implementation.
    Module {
        decls: Vec<NodeId>,
    },
    /// Configuration implementation.
    Configuration {
        components: Vec<NodeId>,
        connections: Vec<NodeId>,
    },
}

impl NodeKind {
    pub const fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::Literal(_)
                | NodeKind::Identifier { .. }
                | NodeKind::InterfaceDeref { .. }
                | NodeKind::FieldRef { .. }
                | NodeKind::Unary { .. }
                | NodeKind::Binary { .. }
                | NodeKind::Conditional { .. }
                | NodeKind::Cast { .. }
                | NodeKind::Call { .. }
                | NodeKind::InitList { .. }
        )
    }

    /// The declaration this node references or declares.
    pub fn decl(&self) -> Option<DeclId> {
        match self {
            NodeKind::Identifier { decl, .. }
            | NodeKind::InterfaceDeref { decl, .. }
            | NodeKind::TypeName { decl, .. }
            | NodeKind::Enumerator { decl, .. }
            | NodeKind::VariableDecl { decl, .. }
            | NodeKind::FunctionDef { decl, .. } => Some(*decl),
            _ => None,
        }
    }

    pub fn decl_mut(&mut self) -> Option<&mut DeclId> {
        match self {
            NodeKind::Identifier { decl, .. }
            | NodeKind::InterfaceDeref { decl, .. }
            | NodeKind::TypeName { decl, .. }
            | NodeKind::Enumerator { decl, .. }
            | NodeKind::VariableDecl { decl, .. }
            | NodeKind::FunctionDef { decl, .. } => Some(decl),
            _ => None,
        }
    }

    /// Child nodes in source order.
    pub fn children(&self) -> SmallVec<[NodeId; 4]> {
        let mut out = SmallVec::new();
        match self {
            NodeKind::Literal(_)
            | NodeKind::Identifier { .. }
            | NodeKind::TypeName { .. }
            | NodeKind::Return(None) => {}
            NodeKind::InterfaceDeref { object, .. } | NodeKind::FieldRef { object, .. } => {
                out.push(*object);
            }
            NodeKind::Unary { operand, .. } => out.push(*operand),
            NodeKind::Binary { lhs, rhs, .. } => out.extend([*lhs, *rhs]),
            NodeKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => out.extend([*cond, *then_expr, *else_expr]),
            NodeKind::Cast { type_ref, expr } => out.extend([*type_ref, *expr]),
            NodeKind::Call { callee, args } => {
                out.push(*callee);
                out.extend(args.iter().copied());
            }
            NodeKind::InitList { elems: list }
            | NodeKind::TagRef { members: list, .. }
            | NodeKind::Compound { stmts: list }
            | NodeKind::ComponentRef { args: list, .. }
            | NodeKind::EndpointRef { args: list, .. }
            | NodeKind::Module { decls: list } => out.extend(list.iter().copied()),
            NodeKind::TypeRef { elem: opt }
            | NodeKind::FieldDecl { type_ref: opt, .. }
            | NodeKind::Enumerator { value: opt, .. }
            | NodeKind::VariableDecl { init: opt, .. } => out.extend(*opt),
            NodeKind::DataDecl { type_ref, decls } => {
                out.extend(*type_ref);
                out.extend(decls.iter().copied());
            }
            NodeKind::FunctionDef { params, body, .. } => {
                out.extend(params.iter().copied());
                out.push(*body);
            }
            NodeKind::ExprStmt(expr) | NodeKind::Return(Some(expr)) => out.push(*expr),
            NodeKind::Connection { from, to } => out.extend([*from, *to]),
            NodeKind::Configuration {
                components,
                connections,
            } => {
                out.extend(components.iter().copied());
                out.extend(connections.iter().copied());
            }
        }
        out
    }

    /// Mutable child slots, in the same order as [`NodeKind::children`].
    pub fn children_mut(&mut self) -> SmallVec<[&mut NodeId; 4]> {
        let mut out = SmallVec::new();
        match self {
            NodeKind::Literal(_)
            | NodeKind::Identifier { .. }
            | NodeKind::TypeName { .. }
            | NodeKind::Return(None) => {}
            NodeKind::InterfaceDeref { object, .. } | NodeKind::FieldRef { object, .. } => {
                out.push(object);
            }
            NodeKind::Unary { operand, .. } => out.push(operand),
            NodeKind::Binary { lhs, rhs, .. } => {
                out.push(lhs);
                out.push(rhs);
            }
            NodeKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                out.push(cond);
                out.push(then_expr);
                out.push(else_expr);
            }
            NodeKind::Cast { type_ref, expr } => {
                out.push(type_ref);
                out.push(expr);
            }
            NodeKind::Call { callee, args } => {
                out.push(callee);
                out.extend(args.iter_mut());
            }
            NodeKind::InitList { elems: list }
            | NodeKind::TagRef { members: list, .. }
            | NodeKind::Compound { stmts: list }
            | NodeKind::ComponentRef { args: list, .. }
            | NodeKind::EndpointRef { args: list, .. }
            | NodeKind::Module { decls: list } => out.extend(list.iter_mut()),
            NodeKind::TypeRef { elem: opt }
            | NodeKind::FieldDecl { type_ref: opt, .. }
            | NodeKind::Enumerator { value: opt, .. }
            | NodeKind::VariableDecl { init: opt, .. } => out.extend(opt.as_mut()),
            NodeKind::DataDecl { type_ref, decls } => {
                out.extend(type_ref.as_mut());
                out.extend(decls.iter_mut());
            }
            NodeKind::FunctionDef { params, body, .. } => {
                out.extend(params.iter_mut());
                out.push(body);
            }
            NodeKind::ExprStmt(expr) | NodeKind::Return(Some(expr)) => out.push(expr),
            NodeKind::Connection { from, to } => {
                out.push(from);
                out.push(to);
            }
            NodeKind::Configuration {
                components,
                connections,
            } => {
                out.extend(components.iter_mut());
                out.extend(connections.iter_mut());
            }
        }
        out
    }
}

/// A syntax node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub loc: Location,
    /// Type of an expression or written type. `None` elsewhere, and on
    /// initializer nodes.
    pub ty: Option<TypeId>,
    /// Folded value of a constant expression.
    pub cst: Option<Constant>,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind, loc: Location) -> Self {
        Node {
            kind,
            loc,
            ty: None,
            cst: None,
            parent: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, ty: TypeId) -> Self {
        self.ty = Some(ty);
        self
    }
}
