//! JSON lines edge format.

use crate::{ProvEdge, Result};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Read};
use tracing::warn;

/// JSON lines handler.
///
/// ```text
/// {"subject": "bash", "event": "fork", "object": "curl"}
/// {"subject": "curl", "event": "connect", "object": "10.0.0.5:443", "ts": 1690000000}
/// ```
///
/// Extra fields are ignored.
pub struct JsonLines;

#[derive(Deserialize)]
struct Record {
    subject: String,
    event: String,
    object: String,
}

impl JsonLines {
    /// Read edges, one JSON object per line.
    ///
    /// Blank lines are skipped. Lines that are not valid JSON or lack one of
    /// the three string fields are skipped with a warning. IO errors abort.
    pub fn read<R: Read>(reader: R) -> Result<Vec<ProvEdge>> {
        let reader = BufReader::new(reader);
        let mut edges = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let line_num = idx as u64 + 1;

            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<Record>(line) {
                Ok(r) => edges.push(ProvEdge::new(r.subject, r.event, r.object, line_num)),
                Err(e) => warn!(line = line_num, error = %e, "skipping malformed edge record"),
            }
        }

        Ok(edges)
    }
}
