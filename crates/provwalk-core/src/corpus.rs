//! Activity corpus generation: walk, induce, align, render.
//!
//! ```text
//! edges -> ProvenanceGraph -> walk(start) -> induced edges -> seq order -> text
//! ```

use crate::algo::neighborhood::induced_edges;
use crate::algo::walk::{DepthFirstWalker, Walk, WalkConfig};
use crate::graph::{NodeId, ProvenanceGraph};
use crate::temporal::{render_corpus, temporal_sort};
use crate::{Error, ProvEdge, Result};
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// The corpus sampled around one start node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCorpus {
    /// Requested start node.
    pub start: String,
    /// The walk that selected the neighborhood.
    pub walk: Walk,
    /// Induced edges in ascending `seq` order.
    pub edges: Vec<ProvEdge>,
    /// One `subject,event,object.` sentence per edge, newline separated.
    pub text: String,
}

impl ActivityCorpus {
    /// Number of sentences.
    pub fn sentence_count(&self) -> usize {
        self.edges.len()
    }
}

/// Generates activity corpora from a shared, read-only graph index.
///
/// # Example
///
/// ```rust
/// use provwalk_core::{CorpusGenerator, ProvEdge, ProvenanceGraph, WalkConfig};
///
/// let edges = vec![
///     ProvEdge::new("bash", "fork", "curl", 1),
///     ProvEdge::new("curl", "write", "/tmp/x", 2),
/// ];
/// let graph = ProvenanceGraph::from_edges(&edges);
/// let generator = CorpusGenerator::new(&graph, &edges, WalkConfig::default());
///
/// let corpora = generator.generate_batch(&["bash".to_string(), "ghost".to_string()], 42);
/// assert_eq!(corpora.len(), 2);
/// assert!(corpora[0].text.starts_with("bash,fork,curl."));
/// assert_eq!(corpora[1].text, "");
/// ```
pub struct CorpusGenerator<'a> {
    graph: &'a ProvenanceGraph,
    edges: &'a [ProvEdge],
    config: WalkConfig,
}

impl<'a> CorpusGenerator<'a> {
    /// Create a generator. `graph` must have been built from `edges`.
    #[must_use]
    pub const fn new(graph: &'a ProvenanceGraph, edges: &'a [ProvEdge], config: WalkConfig) -> Self {
        Self {
            graph,
            edges,
            config,
        }
    }

    /// Sample and render the corpus around one start node.
    pub fn generate<R: Rng + ?Sized>(&self, start: &str, rng: &mut R) -> ActivityCorpus {
        let walk = DepthFirstWalker::new(self.graph, self.config).walk(start, rng);
        let edges: Vec<ProvEdge> = temporal_sort(induced_edges(&walk, self.edges))
            .into_iter()
            .cloned()
            .collect();
        let text = render_corpus(&edges);

        ActivityCorpus {
            start: start.to_owned(),
            walk,
            edges,
            text,
        }
    }

    /// Generate one corpus per start node in parallel.
    ///
    /// Start `i` draws from its own `XorShiftRng` seeded with `seed + i`, so
    /// the output is reproducible regardless of thread scheduling. Results
    /// are returned in the order of `starts`.
    pub fn generate_batch<S: AsRef<str> + Sync>(&self, starts: &[S], seed: u64) -> Vec<ActivityCorpus> {
        self.generate_batch_with(starts, seed, |_| {})
    }

    /// [`generate_batch`](Self::generate_batch) with a callback invoked once
    /// per finished corpus, from whichever worker thread produced it.
    pub fn generate_batch_with<S, F>(&self, starts: &[S], seed: u64, on_corpus: F) -> Vec<ActivityCorpus>
    where
        S: AsRef<str> + Sync,
        F: Fn(&ActivityCorpus) + Sync,
    {
        let corpora: Vec<ActivityCorpus> = starts
            .par_iter()
            .enumerate()
            .map(|(i, start)| {
                let mut rng = XorShiftRng::seed_from_u64(seed.wrapping_add(i as u64));
                let corpus = self.generate(start.as_ref(), &mut rng);
                on_corpus(&corpus);
                corpus
            })
            .collect();

        info!(
            starts = starts.len(),
            sentences = corpora.iter().map(ActivityCorpus::sentence_count).sum::<usize>(),
            "generated activity corpora"
        );

        corpora
    }

    /// Choose a start node uniformly among indexed nodes.
    ///
    /// Returns `None` for an empty graph.
    pub fn pick_start<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'a str> {
        let n = self.graph.node_count();
        if n == 0 {
            return None;
        }
        Some(self.graph.name(rng.random_range(0..n) as NodeId))
    }

    /// Sample `floor(node_count * fraction)` start nodes uniformly, with
    /// replacement.
    ///
    /// A fraction above 1 oversamples. Negative or non-finite fractions are
    /// rejected with [`Error::InvalidConfig`].
    pub fn sample_starts<R: Rng + ?Sized>(&self, fraction: f64, rng: &mut R) -> Result<Vec<&'a str>> {
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "start fraction must be a finite non-negative number, got {fraction}"
            )));
        }

        let n = self.graph.node_count();
        let k = (n as f64 * fraction).floor() as usize;
        let graph = self.graph;
        Ok((0..k)
            .map(|_| graph.name(rng.random_range(0..n) as NodeId))
            .collect())
    }
}
