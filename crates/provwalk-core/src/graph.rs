//! Undirected provenance graph index.
//!
//! The index is built once from an edge list and is read-only afterwards,
//! so a single instance can be shared by any number of concurrent walkers.

use crate::algo::components::{component_sizes, connected_components};
use crate::ProvEdge;
use petgraph::graphmap::UnGraphMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Dense interned node identifier, assigned in order of first appearance.
pub type NodeId = u32;

/// Symmetric adjacency, component sizes and degrees for a provenance graph.
///
/// Uses petgraph's `UnGraphMap` so that neighbors form a set (parallel
/// edges collapse) and iterate in insertion order. Stable iteration order
/// is what makes seeded walks reproducible across runs.
///
/// Only nodes that occur in at least one edge are indexed. Lookups for
/// unknown nodes fall back to explicit defaults: component size 1,
/// degree 0, no neighbors.
///
/// # Example
///
/// ```rust
/// use provwalk_core::{ProvEdge, ProvenanceGraph};
///
/// let edges = vec![
///     ProvEdge::new("A", "fork", "B", 1),
///     ProvEdge::new("B", "write", "C", 2),
///     ProvEdge::new("X", "read", "Y", 3),
/// ];
/// let graph = ProvenanceGraph::from_edges(&edges);
///
/// assert_eq!(graph.component_size("A"), 3);
/// assert_eq!(graph.component_size("Y"), 2);
/// assert_eq!(graph.degree("B"), 2);
/// assert_eq!(graph.degree("nobody"), 0);
/// assert_eq!(graph.component_size("nobody"), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ProvenanceGraph {
    graph: UnGraphMap<NodeId, ()>,
    names: Vec<String>,
    ids: HashMap<String, NodeId>,
    component_sizes: Vec<usize>,
    degrees: Vec<usize>,
    component_count: usize,
}

impl Default for ProvenanceGraph {
    fn default() -> Self {
        Self::from_edges(&[])
    }
}

impl ProvenanceGraph {
    /// Build the index from an edge list.
    ///
    /// Each edge links subject and object in both directions. Self-loops put
    /// a node in its own neighbor set.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a ProvEdge>) -> Self {
        let mut index = Self {
            graph: UnGraphMap::new(),
            names: Vec::new(),
            ids: HashMap::new(),
            component_sizes: Vec::new(),
            degrees: Vec::new(),
            component_count: 0,
        };

        for edge in edges {
            let s = index.intern(&edge.subject);
            let o = index.intern(&edge.object);
            index.graph.add_edge(s, o, ());
        }

        index.degrees = (0..index.names.len())
            .map(|id| index.graph.neighbors(id as NodeId).count())
            .collect();

        let components = connected_components(&index.graph);
        index.component_count = components.len();
        index.component_sizes = component_sizes(&components, index.names.len());

        debug!(
            nodes = index.node_count(),
            edges = index.edge_count(),
            components = index.component_count,
            "built provenance graph index"
        );

        index
    }

    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }

        let id = self.names.len() as NodeId;
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), id);
        self.graph.add_node(id);
        id
    }

    /// Interned id of a node, if it appears in any edge.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    /// Name of an interned node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this index.
    pub fn name(&self, id: NodeId) -> &str {
        &self.names[id as usize]
    }

    /// Whether the node appears in at least one edge.
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Neighbor names of a node, in insertion order. Empty for unknown nodes.
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        self.node_id(name)
            .map(|id| self.neighbor_ids(id).map(|n| self.name(n)).collect())
            .unwrap_or_default()
    }

    /// Neighbor ids of an interned node, in insertion order.
    pub fn neighbor_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors(id)
    }

    /// Whether two interned nodes share an edge.
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Neighbor-set cardinality. Unknown nodes have degree 0.
    pub fn degree(&self, name: &str) -> usize {
        self.node_id(name).map_or(0, |id| self.degree_of(id))
    }

    /// Neighbor-set cardinality of an interned node.
    pub fn degree_of(&self, id: NodeId) -> usize {
        self.degrees.get(id as usize).copied().unwrap_or(0)
    }

    /// Size of the connected component containing the node.
    ///
    /// A node that appears in no edge is its own component of size 1.
    pub fn component_size(&self, name: &str) -> usize {
        self.node_id(name).map_or(1, |id| self.component_size_of(id))
    }

    /// Component size of an interned node.
    pub fn component_size_of(&self, id: NodeId) -> usize {
        self.component_sizes.get(id as usize).copied().unwrap_or(1)
    }

    /// Number of indexed nodes.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of distinct undirected adjacencies (self-loops included).
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Whether no edges were indexed.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate node names in order of first appearance.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Connected components as groups of node names.
    pub fn components(&self) -> Vec<Vec<&str>> {
        connected_components(&self.graph)
            .into_iter()
            .map(|c| c.into_iter().map(|id| self.name(id)).collect())
            .collect()
    }

    /// Compute summary statistics.
    ///
    /// Read off the per-node component sizes computed at build time; every
    /// component has at least one node, so the per-node extremes are the
    /// per-component extremes.
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> GraphStats {
        let nodes = self.node_count();
        let max = self.component_sizes.iter().copied().max().unwrap_or(0);
        let min = self.component_sizes.iter().copied().min().unwrap_or(0);
        let (avg, fraction) = if nodes == 0 {
            (0.0, 0.0)
        } else {
            (
                nodes as f64 / self.component_count as f64,
                max as f64 / nodes as f64,
            )
        };

        GraphStats {
            node_count: nodes,
            edge_count: self.edge_count(),
            component_count: self.component_count,
            max_component_size: max,
            min_component_size: min,
            avg_component_size: avg,
            largest_component_fraction: fraction,
        }
    }
}

/// Statistics about a provenance graph index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of indexed nodes.
    pub node_count: usize,
    /// Number of distinct undirected adjacencies.
    pub edge_count: usize,
    /// Number of connected components.
    pub component_count: usize,
    /// Size of the largest component.
    pub max_component_size: usize,
    /// Size of the smallest component.
    pub min_component_size: usize,
    /// Average component size.
    pub avg_component_size: f64,
    /// Fraction of nodes in the largest component.
    pub largest_component_fraction: f64,
}
