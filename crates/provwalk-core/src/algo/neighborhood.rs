//! Induced-subgraph extraction around a walk.

use crate::algo::walk::Walk;
use crate::ProvEdge;
use std::collections::HashSet;

/// Edges whose subject and object both occur in the walk.
///
/// The walk is treated as a node set, so repeated positions do not repeat
/// edges. Returned edges keep their relative input order; callers that need
/// chronological order should pass the result through
/// [`temporal_sort`](crate::temporal::temporal_sort).
///
/// # Complexity
/// O(|walk| + |edges|)
#[must_use]
pub fn induced_edges<'e>(walk: &Walk, edges: &'e [ProvEdge]) -> Vec<&'e ProvEdge> {
    induced_edges_for(walk.node_set(), edges)
}

/// Like [`induced_edges`], for an arbitrary node set.
#[must_use]
pub fn induced_edges_for<'e>(nodes: HashSet<&str>, edges: &'e [ProvEdge]) -> Vec<&'e ProvEdge> {
    edges
        .iter()
        .filter(|e| nodes.contains(e.subject.as_str()) && nodes.contains(e.object.as_str()))
        .collect()
}
