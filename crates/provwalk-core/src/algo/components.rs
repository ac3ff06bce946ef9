//! Connected components over the undirected provenance graph.
//!
//! Component size bounds how long a walk can usefully run: a walk never
//! needs more positions than its start node's component has nodes.

use crate::graph::NodeId;
use petgraph::graphmap::UnGraphMap;
use std::collections::VecDeque;

/// Compute connected components by breadth-first search.
///
/// Sources are taken in node insertion order, and nodes within a component
/// are listed in BFS discovery order, so the output is deterministic.
///
/// Node ids must be dense (`0..node_count`), as assigned by
/// [`ProvenanceGraph`](crate::ProvenanceGraph).
#[must_use]
pub fn connected_components(graph: &UnGraphMap<NodeId, ()>) -> Vec<Vec<NodeId>> {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for source in graph.nodes() {
        if visited[source as usize] {
            continue;
        }

        visited[source as usize] = true;
        queue.push_back(source);
        let mut component = vec![source];

        while let Some(current) = queue.pop_front() {
            for neighbor in graph.neighbors(current) {
                if !visited[neighbor as usize] {
                    visited[neighbor as usize] = true;
                    component.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        components.push(component);
    }

    components
}

/// Spread each component's size onto its members.
///
/// Returns a vector indexed by node id. Every node reachable from another
/// gets the same value.
#[must_use]
pub fn component_sizes(components: &[Vec<NodeId>], node_count: usize) -> Vec<usize> {
    let mut sizes = vec![1; node_count];
    for component in components {
        for &node in component {
            sizes[node as usize] = component.len();
        }
    }
    sizes
}
