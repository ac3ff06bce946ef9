//! Temporal alignment and sentence rendering.
//!
//! Walks follow graph structure, not time. Before a neighborhood is handed
//! to a language model its events are put back into ingestion order and
//! rendered one sentence per line:
//!
//! ```text
//! bash,fork,curl.
//! curl,connect,10.0.0.5:443.
//! curl,write,/tmp/payload.
//! ```

use crate::ProvEdge;
use std::borrow::Borrow;

/// Stable sort by ingestion sequence. Equal `seq` values keep input order.
#[must_use]
pub fn temporal_sort<E: Borrow<ProvEdge>>(mut edges: Vec<E>) -> Vec<E> {
    edges.sort_by_key(|e| <E as Borrow<ProvEdge>>::borrow(e).seq);
    edges
}

/// Render edges as `subject,event,object.` sentences in ascending `seq`
/// order, joined by single newlines with no trailing newline.
///
/// An empty input renders as an empty string.
///
/// # Example
///
/// ```rust
/// use provwalk_core::{render_corpus, ProvEdge};
///
/// let edges = vec![
///     ProvEdge::new("curl", "write", "/tmp/x", 9),
///     ProvEdge::new("bash", "fork", "curl", 4),
/// ];
/// assert_eq!(render_corpus(&edges), "bash,fork,curl.\ncurl,write,/tmp/x.");
/// ```
#[must_use]
pub fn render_corpus<E: Borrow<ProvEdge>>(edges: &[E]) -> String {
    let refs: Vec<&ProvEdge> = edges
        .iter()
        .map(|e| <E as Borrow<ProvEdge>>::borrow(e))
        .collect();
    temporal_sort(refs)
        .iter()
        .map(|e| e.sentence())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_ascending() {
        let edges = vec![
            ProvEdge::new("C", "e3", "D", 30),
            ProvEdge::new("A", "e1", "B", 10),
            ProvEdge::new("B", "e2", "C", 20),
        ];
        let sorted = temporal_sort(edges);
        let seqs: Vec<_> = sorted.iter().map(|e| e.seq).collect();

        assert_eq!(seqs, vec![10, 20, 30]);
    }

    #[test]
    fn test_sort_is_stable() {
        let edges = vec![
            ProvEdge::new("X", "late", "Y", 2),
            ProvEdge::new("A", "first", "B", 1),
            ProvEdge::new("A", "second", "B", 1),
        ];
        let sorted = temporal_sort(edges.iter().collect::<Vec<_>>());
        let events: Vec<_> = sorted.iter().map(|e| e.event.as_str()).collect();

        assert_eq!(events, vec!["first", "second", "late"]);
    }

    #[test]
    fn test_render() {
        let edges = vec![
            ProvEdge::new("A", "e3", "C", 3),
            ProvEdge::new("A", "e1", "B", 1),
            ProvEdge::new("B", "e2", "C", 2),
        ];

        assert_eq!(render_corpus(&edges), "A,e1,B.\nB,e2,C.\nA,e3,C.");
    }

    #[test]
    fn test_render_empty() {
        let edges: Vec<ProvEdge> = Vec::new();
        assert_eq!(render_corpus(&edges), "");
    }

    #[test]
    fn test_render_single_has_no_newline() {
        let edges = vec![ProvEdge::new("p", "exec", "f", 1)];
        assert_eq!(render_corpus(&edges), "p,exec,f.");
    }

    #[test]
    fn test_render_idempotent() {
        let edges = vec![ProvEdge::new("b", "y", "c", 2), ProvEdge::new("a", "x", "b", 1)];
        assert_eq!(render_corpus(&edges), render_corpus(&edges));
    }
}
