//! Wiring graph instantiation.

use nsc_ir::{ConnectionGraph, Endpoint};

use crate::map::InstantiationMap;
use crate::report::ice;

/// Rebuild `template`'s wiring graph with every endpoint forwarded.
///
/// Each template edge `(u, v)` becomes exactly one edge
/// `(forward(u), forward(v))`. Parallel edges are kept, and endpoints with
/// no edges are carried over.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(nodes = template.node_count(), edges = template.edge_count())
)]
pub fn instantiate_graph(template: &ConnectionGraph, map: &InstantiationMap) -> ConnectionGraph {
    let mut copy = ConnectionGraph::new();
    for node in template.nodes() {
        let from = copy.endpoint_lookup(forward_endpoint(template.endpoint(node), map));
        for &to in template.out_edges(node) {
            let to = copy.endpoint_lookup(forward_endpoint(template.endpoint(to), map));
            copy.add_edge(from, to);
        }
    }
    tracing::debug!(
        nodes = copy.node_count(),
        edges = copy.edge_count(),
        "instantiated wiring graph"
    );
    copy
}

fn forward_endpoint(endpoint: &Endpoint, map: &InstantiationMap) -> Endpoint {
    Endpoint {
        component: endpoint
            .component
            .map(|component| map.forward_component(component)),
        interface: endpoint.interface.map(|decl| map.forward_decl(decl)),
        function: endpoint.function.map(|decl| map.forward_decl(decl)),
        args_node: endpoint.args_node.map(|node| match map.node(node) {
            Some(copy) => copy,
            None => ice(format_args!(
                "wiring arguments {node:?} were not cloned with their configuration"
            )),
        }),
    }
}
