//! Wiring graph of a configuration.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{ComponentId, DeclId, EndpointId, NodeId};

/// One side of a wiring edge.
///
/// Two endpoints with equal fields are the same graph node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Endpoint {
    pub component: Option<ComponentId>,
    pub interface: Option<DeclId>,
    pub function: Option<DeclId>,
    /// The `EndpointRef` node carrying generic arguments, if any.
    pub args_node: Option<NodeId>,
}

/// Directed multigraph of endpoints.
///
/// Parallel edges are kept: adding the same edge twice records it twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionGraph {
    endpoints: Vec<Endpoint>,
    out: Vec<SmallVec<[EndpointId; 2]>>,
    index: FxHashMap<Endpoint, EndpointId>,
    edge_count: usize,
}

impl ConnectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node for `endpoint`, created if missing.
    pub fn endpoint_lookup(&mut self, endpoint: Endpoint) -> EndpointId {
        if let Some(&id) = self.index.get(&endpoint) {
            return id;
        }
        let id = EndpointId::from_usize(self.endpoints.len());
        self.endpoints.push(endpoint);
        self.out.push(SmallVec::new());
        self.index.insert(endpoint, id);
        id
    }

    /// The node for `endpoint`, if present.
    pub fn find(&self, endpoint: &Endpoint) -> Option<EndpointId> {
        self.index.get(endpoint).copied()
    }

    pub fn add_edge(&mut self, from: EndpointId, to: EndpointId) {
        self.out[from.index()].push(to);
        self.edge_count += 1;
    }

    pub fn endpoint(&self, id: EndpointId) -> &Endpoint {
        &self.endpoints[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = EndpointId> + '_ {
        (0..self.endpoints.len()).map(EndpointId::from_usize)
    }

    pub fn out_edges(&self, id: EndpointId) -> &[EndpointId] {
        &self.out[id.index()]
    }

    /// All edges as `(from, to)` pairs, grouped by source node.
    pub fn edges(&self) -> impl Iterator<Item = (EndpointId, EndpointId)> + '_ {
        self.nodes()
            .flat_map(move |from| self.out_edges(from).iter().map(move |&to| (from, to)))
    }

    pub fn node_count(&self) -> usize {
        self.endpoints.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
