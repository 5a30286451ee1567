//! Program builder for tests.
//!
//! Builds the IR a parser would produce for small nesC-like programs:
//! components with parameters, module variables, interfaces, component uses
//! and wiring. Every node gets its own span so diagnostics can be matched
//! back to the node that caused them.

use nsc_ir::{
    BinaryOp, Component, ComponentId, ComponentKind, Constant, DeclId, DeclKind, Declaration,
    Endpoint, Location, Node, NodeId, NodeKind, Program, Span, TypeId, TypePool, UnaryOp,
};

use crate::instantiate::specification_copy;

pub(crate) struct Builder {
    pub(crate) program: Program,
    next_offset: u32,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Builder {
            program: Program::new(),
            next_offset: 0,
        }
    }

    fn loc(&mut self) -> Location {
        let start = self.next_offset;
        self.next_offset += 2;
        Location::new(Span::new(start, start + 1))
    }

    pub(crate) fn node(&mut self, kind: NodeKind, ty: Option<TypeId>) -> NodeId {
        let loc = self.loc();
        let mut node = Node::new(kind, loc);
        node.ty = ty;
        self.program.push_node(node)
    }

    pub(crate) fn int(&mut self, value: i128) -> NodeId {
        self.node(
            NodeKind::Literal(Constant::int(value)),
            Some(TypePool::I32),
        )
    }

    pub(crate) fn float(&mut self, value: f64) -> NodeId {
        self.node(
            NodeKind::Literal(Constant::float(value)),
            Some(TypePool::F64),
        )
    }

    pub(crate) fn ident(&mut self, decl: DeclId) -> NodeId {
        let d = self.program.decl(decl);
        let (name, ty) = (d.name, d.ty);
        self.node(NodeKind::Identifier { name, decl }, Some(ty))
    }

    pub(crate) fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.node(NodeKind::Binary { op, lhs, rhs }, Some(TypePool::I32))
    }

    pub(crate) fn neg(&mut self, operand: NodeId) -> NodeId {
        self.node(
            NodeKind::Unary {
                op: UnaryOp::Neg,
                operand,
            },
            Some(TypePool::I32),
        )
    }

    pub(crate) fn type_ref(&mut self, ty: TypeId) -> NodeId {
        self.node(NodeKind::TypeRef { elem: None }, Some(ty))
    }

    fn component(&mut self, name: &str, kind: ComponentKind, is_abstract: bool) -> ComponentId {
        let scope = self.program.new_scope(Some(Program::GLOBAL_SCOPE));
        let name_id = self.program.name(name);
        let id = self
            .program
            .push_component(Component::new(name_id, name, kind, is_abstract, scope));
        let body = match kind {
            ComponentKind::Module => NodeKind::Module { decls: Vec::new() },
            ComponentKind::Configuration => NodeKind::Configuration {
                components: Vec::new(),
                connections: Vec::new(),
            },
        };
        let body = self.node(body, None);
        self.program.component_mut(id).body = Some(body);
        id
    }

    pub(crate) fn module(&mut self, name: &str, is_abstract: bool) -> ComponentId {
        self.component(name, ComponentKind::Module, is_abstract)
    }

    pub(crate) fn configuration(&mut self, name: &str, is_abstract: bool) -> ComponentId {
        self.component(name, ComponentKind::Configuration, is_abstract)
    }

    /// Declare a component-owned declaration in the component's scope.
    pub(crate) fn declare(
        &mut self,
        component: ComponentId,
        name: &str,
        kind: DeclKind,
        ty: TypeId,
    ) -> DeclId {
        let scope = self.program.component(component).scope;
        let name = self.program.name(name);
        self.program
            .declare(scope, Declaration::new(name, kind, ty).in_container(component))
    }

    /// A `VariableDecl` node for `decl`, recorded as its definition.
    pub(crate) fn variable_node(&mut self, decl: DeclId, init: Option<NodeId>) -> NodeId {
        let name = self.program.decl(decl).name;
        let node = self.node(NodeKind::VariableDecl { name, decl, init }, None);
        let d = self.program.decl_mut(decl);
        d.definition = Some(node);
        d.ast = Some(node);
        node
    }

    pub(crate) fn parameter(&mut self, component: ComponentId, name: &str, ty: TypeId) -> DeclId {
        let decl = self.declare(component, name, DeclKind::Variable, ty);
        let node = self.variable_node(decl, None);
        self.program.component_mut(component).parameters.push(node);
        decl
    }

    /// `ty name = init;` at module level.
    pub(crate) fn variable(
        &mut self,
        module: ComponentId,
        name: &str,
        ty: TypeId,
        init: Option<NodeId>,
    ) -> DeclId {
        let decl = self.declare(module, name, DeclKind::Variable, ty);
        let var = self.variable_node(decl, init);
        let type_ref = self.type_ref(ty);
        let data = self.node(
            NodeKind::DataDecl {
                type_ref: Some(type_ref),
                decls: vec![var],
            },
            None,
        );
        self.add_to_body(module, data);
        decl
    }

    /// Append a top-level node to a module body.
    pub(crate) fn add_to_body(&mut self, module: ComponentId, node: NodeId) {
        let Some(body) = self.program.component(module).body else {
            panic!("component has no body");
        };
        match &mut self.program.node_mut(body).kind {
            NodeKind::Module { decls } => decls.push(node),
            other => panic!("not a module body: {other:?}"),
        }
    }

    /// An interface reference with one command per name in `functions`.
    pub(crate) fn interface(
        &mut self,
        component: ComponentId,
        name: &str,
        functions: &[&str],
        gparms: Vec<TypeId>,
    ) -> DeclId {
        let iface = self.declare(component, name, DeclKind::InterfaceRef, TypePool::VOID);
        let mut fns = Vec::with_capacity(functions.len());
        for function in functions {
            let fn_name = self.program.name(function);
            let f = self.program.push_decl(
                Declaration::new(fn_name, DeclKind::Command, TypePool::VOID)
                    .in_container(component),
            );
            self.program.decl_mut(f).interface = Some(iface);
            fns.push(f);
        }
        let d = self.program.decl_mut(iface);
        d.functions = fns;
        d.gparms = gparms;
        self.program.component_mut(component).specification.push(iface);
        iface
    }

    /// `components new Template(args) as local;` inside `config`.
    pub(crate) fn use_component(
        &mut self,
        config: ComponentId,
        template: ComponentId,
        local: &str,
        args: Vec<NodeId>,
    ) -> (NodeId, ComponentId) {
        let copy_is_abstract = self.program.component(config).is_abstract;
        let used = if self.program.component(template).is_abstract {
            specification_copy(&mut self.program, template, local, copy_is_abstract)
        } else {
            template
        };
        let name = self.program.name(local);
        let node = self.node(
            NodeKind::ComponentRef {
                name,
                component: used,
                args,
            },
            None,
        );
        let Some(body) = self.program.component(config).body else {
            panic!("configuration has no body");
        };
        match &mut self.program.node_mut(body).kind {
            NodeKind::Configuration { components, .. } => components.push(node),
            other => panic!("not a configuration body: {other:?}"),
        }
        (node, used)
    }

    /// `ty a, b, ...;` at module level, one `VariableDecl` per node in `vars`.
    pub(crate) fn data_decl(&mut self, module: ComponentId, ty: TypeId, vars: Vec<NodeId>) {
        let type_ref = self.type_ref(ty);
        let data = self.node(
            NodeKind::DataDecl {
                type_ref: Some(type_ref),
                decls: vars,
            },
            None,
        );
        self.add_to_body(module, data);
    }

    /// An `EndpointRef` carrying `args`, placed among `config`'s wiring.
    pub(crate) fn endpoint_args(&mut self, config: ComponentId, args: Vec<NodeId>) -> NodeId {
        let node = self.node(
            NodeKind::EndpointRef {
                path: Vec::new(),
                args,
            },
            None,
        );
        let Some(body) = self.program.component(config).body else {
            panic!("configuration has no body");
        };
        match &mut self.program.node_mut(body).kind {
            NodeKind::Configuration { connections, .. } => connections.push(node),
            other => panic!("not a configuration body: {other:?}"),
        }
        node
    }

    /// The `index`th specification declaration of `component`.
    pub(crate) fn spec(&self, component: ComponentId, index: usize) -> DeclId {
        self.program.component(component).specification[index]
    }

    /// Wire `from -> to` in `config`'s graph.
    pub(crate) fn wire(&mut self, config: ComponentId, from: Endpoint, to: Endpoint) {
        let graph = &mut self.program.component_mut(config).connections;
        let from = graph.endpoint_lookup(from);
        let to = graph.endpoint_lookup(to);
        graph.add_edge(from, to);
    }
}

pub(crate) fn endpoint(component: ComponentId, interface: DeclId) -> Endpoint {
    Endpoint {
        component: Some(component),
        interface: Some(interface),
        ..Endpoint::default()
    }
}

/// Every node reachable from `root`, `root` included.
pub(crate) fn subtree(program: &Program, root: NodeId) -> Vec<NodeId> {
    let mut out = vec![root];
    let mut index = 0;
    while index < out.len() {
        let children = program.node(out[index]).kind.children();
        out.extend(children);
        index += 1;
    }
    out
}

/// The declaration of the first `VariableDecl` named `name` under `root`.
pub(crate) fn find_variable(program: &Program, root: NodeId, name: &str) -> DeclId {
    let name = program.name(name);
    subtree(program, root)
        .into_iter()
        .find_map(|node| match program.node(node).kind {
            NodeKind::VariableDecl { name: n, decl, .. } if n == name => Some(decl),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no variable named {name:?}"))
}

/// The component used under `local` in `config`'s body.
pub(crate) fn used_component(program: &Program, config: ComponentId, local: &str) -> ComponentId {
    let local = program.name(local);
    crate::walk::component_refs(program, config)
        .into_iter()
        .find_map(|node| match program.node(node).kind {
            NodeKind::ComponentRef {
                name, component, ..
            } if name == local => Some(component),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no component used as {local:?}"))
}

/// The declaration of `component`'s `index`th parameter.
pub(crate) fn param_decl(program: &Program, component: ComponentId, index: usize) -> DeclId {
    let node = program.component(component).parameters[index];
    program
        .node(node)
        .kind
        .decl()
        .unwrap_or_else(|| panic!("parameter {index} declares nothing"))
}

/// The node in `copy` at the position `original` has in `template`.
///
/// Both trees are walked breadth-first; a clone has the shape of its
/// template.
pub(crate) fn clone_of(program: &Program, template: NodeId, copy: NodeId, original: NodeId) -> NodeId {
    let position = subtree(program, template)
        .iter()
        .position(|&node| node == original)
        .unwrap_or_else(|| panic!("{original:?} is not under {template:?}"));
    subtree(program, copy)[position]
}
