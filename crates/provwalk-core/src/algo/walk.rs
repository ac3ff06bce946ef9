//! Priority-biased depth-first walks.
//!
//! A walk starts at a chosen node and repeatedly hops to a neighbor of the
//! current node. Each hop is either uniform (with probability `random_prob`,
//! and always on the first hop) or chosen by a three-level [`PriorityKey`]
//! computed against the node visited before the current one.
//!
//! Walk length is bounded by both the requested maximum and the size of
//! the start node's connected component. Nodes may be revisited; the
//! visited set only feeds the unexplored-neighbor ratio of the key.
//!
//! Randomness is passed in explicitly. Two walks with the same inputs and
//! identically seeded generators are identical, and walks sharing one
//! [`ProvenanceGraph`] can run on different threads without coordination.

use crate::graph::{NodeId, ProvenanceGraph};
use crate::{Error, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Configuration for depth-first walks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Maximum number of positions in a walk.
    pub max_length: usize,
    /// Probability of a uniform hop once a parent exists.
    /// - 0.0: always use the priority key
    /// - 1.0: plain uniform random walk
    pub random_prob: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_length: 10,
            random_prob: 0.2,
        }
    }
}

impl WalkConfig {
    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(Error::InvalidConfig("max_length must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.random_prob) {
            return Err(Error::InvalidConfig(format!(
                "random_prob must be in [0, 1], got {}",
                self.random_prob
            )));
        }
        Ok(())
    }
}

/// Closeness of a candidate to the walk's parent node.
///
/// Ordered so that closer is greater: `Distant < Adjacent < Parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Proximity {
    /// Neither the parent nor one of its neighbors.
    Distant,
    /// Shares an edge with the parent (the hop closes a triangle).
    Adjacent,
    /// The parent itself.
    Parent,
}

/// Ranking of a candidate next hop. Higher is better.
///
/// Compared lexicographically:
/// 1. [`Proximity`] to the parent, closer first
/// 2. fraction of the candidate's neighbors not yet visited, larger first
/// 3. candidate degree, larger first
#[derive(Debug, Clone, Copy)]
pub struct PriorityKey {
    /// Closeness to the parent.
    pub proximity: Proximity,
    /// `|neighbors \ visited| / max(degree, 1)`, in `[0, 1]`.
    pub unvisited_ratio: f64,
    /// Neighbor-set cardinality.
    pub degree: usize,
}

impl PriorityKey {
    /// Score `candidate` as the hop after the current node, whose
    /// predecessor in the walk is `parent`.
    #[allow(clippy::cast_precision_loss)]
    pub fn score(
        graph: &ProvenanceGraph,
        candidate: NodeId,
        parent: NodeId,
        visited: &HashSet<NodeId>,
    ) -> Self {
        let proximity = if candidate == parent {
            Proximity::Parent
        } else if graph.are_adjacent(candidate, parent) {
            Proximity::Adjacent
        } else {
            Proximity::Distant
        };

        let degree = graph.degree_of(candidate);
        let unvisited = graph
            .neighbor_ids(candidate)
            .filter(|n| !visited.contains(n))
            .count();

        Self {
            proximity,
            unvisited_ratio: unvisited as f64 / degree.max(1) as f64,
            degree,
        }
    }
}

impl PartialEq for PriorityKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityKey {}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.proximity
            .cmp(&other.proximity)
            .then_with(|| self.unvisited_ratio.total_cmp(&other.unvisited_ratio))
            .then_with(|| self.degree.cmp(&other.degree))
    }
}

/// An ordered node sequence produced by a walk.
///
/// Never empty; the first element is the requested start node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Walk(Vec<String>);

impl Walk {
    /// A walk consisting of the start node only.
    pub fn singleton(start: impl Into<String>) -> Self {
        Self(vec![start.into()])
    }

    /// Wrap an existing node sequence. `None` if it is empty.
    pub fn from_nodes(nodes: Vec<String>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Self(nodes))
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for walks produced by a walker.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The start node.
    pub fn start(&self) -> &str {
        &self.0[0]
    }

    /// Nodes in walk order, repeats included.
    pub fn nodes(&self) -> &[String] {
        &self.0
    }

    /// Distinct nodes of the walk.
    pub fn node_set(&self) -> HashSet<&str> {
        self.0.iter().map(String::as_str).collect()
    }

    /// Whether the node occurs anywhere in the walk.
    pub fn contains(&self, node: &str) -> bool {
        self.0.iter().any(|n| n == node)
    }
}

impl TryFrom<Vec<String>> for Walk {
    type Error = Error;

    fn try_from(nodes: Vec<String>) -> Result<Self> {
        Self::from_nodes(nodes).ok_or(Error::EmptyWalk)
    }
}

impl From<Walk> for Vec<String> {
    fn from(walk: Walk) -> Self {
        walk.0
    }
}

/// Depth-first walker with prioritized neighbor selection.
///
/// # Example
///
/// ```rust
/// use provwalk_core::{DepthFirstWalker, ProvEdge, ProvenanceGraph, WalkConfig};
/// use rand::SeedableRng;
/// use rand_xorshift::XorShiftRng;
///
/// let edges = vec![
///     ProvEdge::new("A", "fork", "B", 1),
///     ProvEdge::new("B", "write", "C", 2),
/// ];
/// let graph = ProvenanceGraph::from_edges(&edges);
/// let walker = DepthFirstWalker::new(&graph, WalkConfig { max_length: 5, random_prob: 0.2 });
///
/// let mut rng = XorShiftRng::seed_from_u64(42);
/// let walk = walker.walk("A", &mut rng);
///
/// assert_eq!(walk.start(), "A");
/// assert_eq!(walk.len(), 3); // bounded by the component size
/// ```
pub struct DepthFirstWalker<'a> {
    graph: &'a ProvenanceGraph,
    config: WalkConfig,
}

impl<'a> DepthFirstWalker<'a> {
    /// Create a walker over a built index.
    #[must_use]
    pub const fn new(graph: &'a ProvenanceGraph, config: WalkConfig) -> Self {
        Self { graph, config }
    }

    /// Walk from `start`.
    ///
    /// Returns `[start]` when the node is not in the graph or the length
    /// bound `min(max_length, component_size(start))` is at most 1.
    pub fn walk<R: Rng + ?Sized>(&self, start: &str, rng: &mut R) -> Walk {
        let Some(start_id) = self.graph.node_id(start) else {
            return Walk::singleton(start);
        };

        let bound = self
            .config
            .max_length
            .min(self.graph.component_size_of(start_id));
        if bound <= 1 {
            return Walk::singleton(start);
        }

        let ids = self.walk_ids(start_id, bound, rng);
        Walk(ids.into_iter().map(|id| self.graph.name(id).to_owned()).collect())
    }

    fn walk_ids<R: Rng + ?Sized>(&self, start: NodeId, bound: usize, rng: &mut R) -> Vec<NodeId> {
        let mut sequence = Vec::with_capacity(bound);
        sequence.push(start);
        let mut visited = HashSet::from([start]);
        let mut current = start;

        while sequence.len() < bound {
            let neighbors: Vec<NodeId> = self.graph.neighbor_ids(current).collect();
            if neighbors.is_empty() {
                debug!(
                    node = self.graph.name(current),
                    len = sequence.len(),
                    bound,
                    "walk reached a node without neighbors"
                );
                break;
            }

            // The mode draw only happens once a parent exists.
            let prioritized = sequence.len() >= 2 && rng.random::<f64>() >= self.config.random_prob;

            let chosen = if prioritized {
                let parent = sequence[sequence.len() - 2];
                self.select_by_priority(parent, &neighbors, &visited, rng)
            } else {
                None
            };

            let Some(next) = chosen.or_else(|| neighbors.choose(rng).copied()) else {
                break;
            };

            sequence.push(next);
            visited.insert(next);
            current = next;
        }

        sequence
    }

    /// Pick uniformly among the candidates tied at the maximal key.
    ///
    /// Returns `None` only for an empty candidate list, in which case the
    /// caller falls back to a uniform pick.
    fn select_by_priority<R: Rng + ?Sized>(
        &self,
        parent: NodeId,
        candidates: &[NodeId],
        visited: &HashSet<NodeId>,
        rng: &mut R,
    ) -> Option<NodeId> {
        let mut top: Option<PriorityKey> = None;
        let mut tied = Vec::new();

        for &candidate in candidates {
            let key = PriorityKey::score(self.graph, candidate, parent, visited);
            match top.map(|t| key.cmp(&t)) {
                None | Some(Ordering::Greater) => {
                    top = Some(key);
                    tied.clear();
                    tied.push(candidate);
                }
                Some(Ordering::Equal) => tied.push(candidate),
                Some(Ordering::Less) => {}
            }
        }

        tied.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProvEdge;
    use rand_xorshift::XorShiftRng;

    fn graph(pairs: &[(&str, &str)]) -> ProvenanceGraph {
        let edges: Vec<_> = pairs
            .iter()
            .enumerate()
            .map(|(i, (s, o))| ProvEdge::new(*s, "rel", *o, i as u64 + 1))
            .collect();
        ProvenanceGraph::from_edges(&edges)
    }

    fn id(g: &ProvenanceGraph, name: &str) -> NodeId {
        g.node_id(name).unwrap()
    }

    fn config(max_length: usize, random_prob: f64) -> WalkConfig {
        WalkConfig {
            max_length,
            random_prob,
        }
    }

    #[test]
    fn test_config_validate() {
        assert!(WalkConfig::default().validate().is_ok());
        assert!(config(0, 0.5).validate().is_err());
        assert!(config(3, 1.5).validate().is_err());
        assert!(config(3, -0.1).validate().is_err());
        assert!(config(3, f64::NAN).validate().is_err());
        assert!(config(1, 0.0).validate().is_ok());
        assert!(config(1, 1.0).validate().is_ok());
    }

    #[test]
    fn test_isolated_start() {
        let g = graph(&[("A", "B")]);
        let walker = DepthFirstWalker::new(&g, config(10, 0.2));
        let mut rng = XorShiftRng::seed_from_u64(1);

        assert_eq!(walker.walk("ghost", &mut rng).nodes(), ["ghost"]);
    }

    #[test]
    fn test_bound_of_one() {
        let g = graph(&[("A", "B"), ("B", "C")]);
        let mut rng = XorShiftRng::seed_from_u64(1);

        let walker = DepthFirstWalker::new(&g, config(1, 0.2));
        assert_eq!(walker.walk("A", &mut rng).nodes(), ["A"]);

        let walker = DepthFirstWalker::new(&g, config(0, 0.2));
        assert_eq!(walker.walk("A", &mut rng).nodes(), ["A"]);
    }

    #[test]
    fn test_singleton_component_with_self_loop() {
        let g = graph(&[("A", "A")]);
        let walker = DepthFirstWalker::new(&g, config(10, 0.0));
        let mut rng = XorShiftRng::seed_from_u64(3);

        assert_eq!(walker.walk("A", &mut rng).nodes(), ["A"]);
    }

    #[test]
    fn test_length_bounded_by_component() {
        let g = graph(&[("A", "B"), ("B", "C"), ("X", "Y")]);
        let walker = DepthFirstWalker::new(&g, config(100, 0.5));

        for seed in 0..20 {
            let mut rng = XorShiftRng::seed_from_u64(seed);
            assert_eq!(walker.walk("A", &mut rng).len(), 3);
            assert_eq!(walker.walk("X", &mut rng).len(), 2);
        }
    }

    #[test]
    fn test_length_bounded_by_max_length() {
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")]);
        let walker = DepthFirstWalker::new(&g, config(3, 0.5));
        let mut rng = XorShiftRng::seed_from_u64(9);

        assert_eq!(walker.walk("C", &mut rng).len(), 3);
    }

    #[test]
    fn test_every_hop_follows_an_edge() {
        let g = graph(&[("A", "B"), ("B", "C"), ("A", "C"), ("C", "D"), ("D", "E")]);
        let walker = DepthFirstWalker::new(&g, config(5, 0.5));

        for seed in 0..50 {
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let walk = walker.walk("A", &mut rng);
            for pair in walk.nodes().windows(2) {
                assert!(
                    g.neighbors(&pair[0]).contains(&pair[1].as_str()),
                    "{} -> {} is not an edge",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn test_reproducible_with_same_seed() {
        let g = graph(&[("A", "B"), ("B", "C"), ("A", "C"), ("C", "D"), ("D", "E"), ("E", "A")]);
        let walker = DepthFirstWalker::new(&g, config(5, 0.5));

        let mut rng1 = XorShiftRng::seed_from_u64(999);
        let mut rng2 = XorShiftRng::seed_from_u64(999);

        for start in ["A", "C", "E"] {
            assert_eq!(walker.walk(start, &mut rng1), walker.walk(start, &mut rng2));
        }
    }

    #[test]
    fn test_priority_mode_returns_to_parent() {
        // Triangle A-B-C plus C-D. With random_prob = 0 every hop after the
        // first is prioritized, and the parent always outranks the rest.
        let g = graph(&[("A", "B"), ("B", "C"), ("A", "C"), ("C", "D")]);
        let walker = DepthFirstWalker::new(&g, config(3, 0.0));

        for seed in 0..20 {
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let walk = walker.walk("A", &mut rng);

            assert_eq!(walk.len(), 3);
            assert_eq!(walk.nodes()[0], "A");
            assert!(["B", "C"].contains(&walk.nodes()[1].as_str()));
            assert_eq!(walk.nodes()[2], "A");
        }
    }

    #[test]
    fn test_uniform_mode_reaches_beyond_parent() {
        // Star around B: a uniform walk from A must leave A's neighborhood.
        let g = graph(&[("A", "B"), ("B", "C"), ("B", "D"), ("B", "E")]);
        let walker = DepthFirstWalker::new(&g, config(3, 1.0));

        let reached_other = (0..50).any(|seed| {
            let mut rng = XorShiftRng::seed_from_u64(seed);
            walker.walk("A", &mut rng).nodes()[2] != "A"
        });
        assert!(reached_other);
    }

    #[test]
    fn test_proximity_order() {
        assert!(Proximity::Parent > Proximity::Adjacent);
        assert!(Proximity::Adjacent > Proximity::Distant);
    }

    #[test]
    fn test_key_levels() {
        let key = |proximity, unvisited_ratio, degree| PriorityKey {
            proximity,
            unvisited_ratio,
            degree,
        };

        // Level 1 dominates.
        assert!(key(Proximity::Parent, 0.0, 1) > key(Proximity::Adjacent, 1.0, 100));
        assert!(key(Proximity::Adjacent, 0.0, 1) > key(Proximity::Distant, 1.0, 100));
        // Equal proximity: unvisited ratio decides.
        assert!(key(Proximity::Distant, 0.75, 1) > key(Proximity::Distant, 0.5, 100));
        // Equal proximity and ratio: degree decides.
        assert!(key(Proximity::Distant, 0.5, 4) > key(Proximity::Distant, 0.5, 2));
        // Full tie.
        assert_eq!(key(Proximity::Adjacent, 0.5, 2), key(Proximity::Adjacent, 0.5, 2));
    }

    #[test]
    fn test_key_score() {
        // P - X, X - Y, P - Y (triangle), P - Z, Z - W
        let g = graph(&[("P", "X"), ("X", "Y"), ("P", "Y"), ("P", "Z"), ("Z", "W")]);
        let visited = HashSet::from([id(&g, "P"), id(&g, "X")]);
        let p = id(&g, "P");

        let on_parent = PriorityKey::score(&g, p, p, &visited);
        assert_eq!(on_parent.proximity, Proximity::Parent);

        let y = PriorityKey::score(&g, id(&g, "Y"), p, &visited);
        assert_eq!(y.proximity, Proximity::Adjacent);
        assert_eq!(y.degree, 2);
        assert!((y.unvisited_ratio - 0.0).abs() < 1e-12);

        let w = PriorityKey::score(&g, id(&g, "W"), p, &visited);
        assert_eq!(w.proximity, Proximity::Distant);
        assert_eq!(w.degree, 1);
        assert!((w.unvisited_ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_select_prefers_unvisited_ratio() {
        // Parent P. Candidates A and B are both distant from P.
        // A's neighbors: Q (visited), R. B's neighbors: S, T (both unvisited).
        let g = graph(&[("P", "Q"), ("A", "Q"), ("A", "R"), ("B", "S"), ("B", "T")]);
        let walker = DepthFirstWalker::new(&g, config(10, 0.0));
        let visited = HashSet::from([id(&g, "P"), id(&g, "Q")]);
        let candidates = [id(&g, "A"), id(&g, "B")];

        for seed in 0..10 {
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let chosen = walker.select_by_priority(id(&g, "P"), &candidates, &visited, &mut rng);
            assert_eq!(chosen, Some(id(&g, "B")));
        }
    }

    #[test]
    fn test_select_prefers_degree_on_ratio_tie() {
        // A and B distant from P, all neighbors unvisited; B has more.
        let g = graph(&[("P", "Q"), ("A", "R"), ("B", "S"), ("B", "T"), ("B", "U")]);
        let walker = DepthFirstWalker::new(&g, config(10, 0.0));
        let visited = HashSet::from([id(&g, "P")]);
        let candidates = [id(&g, "A"), id(&g, "B")];

        let mut rng = XorShiftRng::seed_from_u64(5);
        let chosen = walker.select_by_priority(id(&g, "P"), &candidates, &visited, &mut rng);
        assert_eq!(chosen, Some(id(&g, "B")));
    }

    #[test]
    fn test_select_breaks_full_ties_randomly() {
        // A and B have identical keys relative to P.
        let g = graph(&[("P", "Q"), ("A", "R"), ("B", "S")]);
        let walker = DepthFirstWalker::new(&g, config(10, 0.0));
        let visited = HashSet::from([id(&g, "P")]);
        let candidates = [id(&g, "A"), id(&g, "B")];

        let picks: HashSet<_> = (0..64)
            .filter_map(|seed| {
                let mut rng = XorShiftRng::seed_from_u64(seed);
                walker.select_by_priority(id(&g, "P"), &candidates, &visited, &mut rng)
            })
            .collect();
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn test_select_with_no_candidates_falls_through() {
        // Not reachable from `walk`, which checks for neighbors first.
        let g = graph(&[("P", "Q")]);
        let walker = DepthFirstWalker::new(&g, config(10, 0.0));
        let mut rng = XorShiftRng::seed_from_u64(0);

        let chosen = walker.select_by_priority(id(&g, "P"), &[], &HashSet::new(), &mut rng);
        assert_eq!(chosen, None);
    }
}
