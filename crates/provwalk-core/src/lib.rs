#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

//! Activity corpus sampling over provenance graphs.
//!
//! A provenance graph records system audit events as
//! `(subject, event, object)` edges: a process forks another, writes a
//! file, opens a socket. This crate samples small, localized neighborhoods
//! of such a graph and renders them as chronologically ordered sentences
//! that a language model can read.
//!
//! # Pipeline
//!
//! ```text
//! edges ──► ProvenanceGraph ──► DepthFirstWalker ──► induced_edges ──► render_corpus
//!           (adjacency,          (start, bounds,      (walk node set)    (seq order,
//!            component sizes,     rng)                                    one sentence
//!            degrees)                                                     per line)
//! ```
//!
//! - [`ProvenanceGraph`] - undirected index with component sizes and degrees
//! - [`DepthFirstWalker`] - one priority-biased walk from a start node
//! - [`induced_edges`] - edges with both endpoints in the walk
//! - [`render_corpus`] - temporal ordering and sentence rendering
//! - [`CorpusGenerator`] - all of the above, for one or many start nodes
//!
//! # Walk Heuristic
//!
//! After the first (uniform) hop, each hop is uniform with probability
//! `random_prob`; otherwise candidates are ranked by a [`PriorityKey`]:
//!
//! | Level | Measure | Preference |
//! |-------|---------|------------|
//! | 1 | Proximity to the previous node | parent > parent's neighbor > other |
//! | 2 | Unvisited fraction of the candidate's neighbors | higher |
//! | 3 | Candidate degree | higher (hubs) |
//!
//! Ties at the top are broken uniformly at random.
//!
//! # Reproducibility
//!
//! No global random state is used. Every walk takes an explicit `Rng`, and
//! graph iteration order is fixed by edge order, so a fixed seed gives the
//! same corpus on every run.
//!
//! # Example
//!
//! ```rust
//! use provwalk_core::{CorpusGenerator, ProvEdge, ProvenanceGraph, WalkConfig};
//! use rand::SeedableRng;
//! use rand_xorshift::XorShiftRng;
//!
//! let edges = vec![
//!     ProvEdge::new("A", "e1", "B", 1),
//!     ProvEdge::new("B", "e2", "C", 2),
//!     ProvEdge::new("A", "e3", "C", 3),
//!     ProvEdge::new("C", "e4", "D", 4),
//! ];
//! let graph = ProvenanceGraph::from_edges(&edges);
//! let generator = CorpusGenerator::new(&graph, &edges, WalkConfig { max_length: 4, random_prob: 0.2 });
//!
//! let mut rng = XorShiftRng::seed_from_u64(42);
//! let corpus = generator.generate("A", &mut rng);
//!
//! assert_eq!(corpus.walk.len(), 4);
//! for line in corpus.text.lines() {
//!     assert!(line.ends_with('.'));
//! }
//! ```

pub mod algo;
mod corpus;
mod edge;
mod error;
pub mod formats;
mod graph;
pub mod temporal;

pub use algo::neighborhood::induced_edges;
pub use algo::walk::{DepthFirstWalker, PriorityKey, Proximity, Walk, WalkConfig};
pub use corpus::{ActivityCorpus, CorpusGenerator};
pub use edge::{ProvEdge, Seq};
pub use error::{Error, Result};
pub use graph::{GraphStats, NodeId, ProvenanceGraph};
pub use temporal::{render_corpus, temporal_sort};
