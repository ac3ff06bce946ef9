//! Provenance edge type.
//!
//! An edge is one audit event: a subject (usually a process) acting on an
//! object (a file, socket or another process), stamped with its position
//! in the chronologically sorted input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an edge in ingestion order (1-based, gaps allowed).
pub type Seq = u64;

/// A (subject, event, object) audit event with its ingestion sequence.
///
/// Edges are not deduplicated: the same triple may appear several times
/// with different sequence numbers.
///
/// # Example
///
/// ```rust
/// use provwalk_core::ProvEdge;
///
/// let edge = ProvEdge::new("bash", "execute", "/usr/bin/curl", 7);
/// assert_eq!(edge.sentence(), "bash,execute,/usr/bin/curl.");
/// assert_eq!(edge.seq, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProvEdge {
    /// Acting node.
    pub subject: String,

    /// Event-type label.
    pub event: String,

    /// Node acted upon.
    pub object: String,

    /// Ingestion position, standing in for event time.
    pub seq: Seq,
}

impl ProvEdge {
    /// Create a new edge.
    pub fn new(
        subject: impl Into<String>,
        event: impl Into<String>,
        object: impl Into<String>,
        seq: Seq,
    ) -> Self {
        Self {
            subject: subject.into(),
            event: event.into(),
            object: object.into(),
            seq,
        }
    }

    /// Render as a corpus sentence: `subject,event,object.`
    pub fn sentence(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProvEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}.", self.subject, self.event, self.object)
    }
}
