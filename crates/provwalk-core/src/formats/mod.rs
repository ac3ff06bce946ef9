//! Edge and node list readers.
//!
//! Inputs are produced upstream by log parsers that have already sorted
//! events chronologically. Each edge's `seq` is its 1-based position in the
//! file, so blank or rejected lines leave gaps but never reorder events.
//!
//! - [`JsonLines`] - one `{"subject", "event", "object"}` object per line
//! - [`Csv`] - headerless `subject,event,object` records
//! - [`read_nodes`] - one node id per line

mod csv;
mod jsonl;
mod nodes;

pub use self::csv::Csv;
pub use jsonl::JsonLines;
pub use nodes::{read_nodes, read_nodes_file};

use crate::{ProvEdge, Result};
use std::fs::File;
use std::path::Path;

/// Read an edge file, choosing the format from its extension.
///
/// `.csv` files are read as CSV; everything else as JSON lines.
pub fn read_edges_file(path: impl AsRef<Path>) -> Result<Vec<ProvEdge>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        Csv::read(file)
    } else {
        JsonLines::read(file)
    }
}
